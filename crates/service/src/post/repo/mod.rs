pub mod seaorm;

pub use seaorm::SeaOrmPostRepository;
