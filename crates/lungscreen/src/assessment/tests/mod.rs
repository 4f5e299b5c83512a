mod common;
mod predictor;
mod reconciler;
