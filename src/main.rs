use std::env;
use std::process;

use recipe_extract::{RecipeExtractor, Settings};

#[tokio::main]
async fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let url = match args.get(1) {
        Some(url) => url,
        None => {
            eprintln!("usage: recipe-extract <url>");
            process::exit(2);
        }
    };

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("configuration error: {}", err);
            process::exit(2);
        }
    };

    let extractor = RecipeExtractor::from_settings(&settings);
    match extractor.extract(url).await {
        Ok(draft) => {
            let json = serde_json::to_string_pretty(&draft)
                .expect("draft serialization cannot fail");
            println!("{}", json);
        }
        Err(err) => {
            eprintln!("error: {}", err);
            eprintln!("hint: {}", err.suggestion());
            process::exit(1);
        }
    }
}
