mod predictor;

pub use predictor::Predictor;
