use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    review_features::cli::run_review_features(std::env::args().skip(1))
}
