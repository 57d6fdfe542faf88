pub mod db;
pub mod game;

pub use db::database_url;
pub use game::GameConfig;
