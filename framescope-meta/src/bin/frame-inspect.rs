use framescope_meta::{decode_html, Card};
use std::env;
use std::fs;
use std::process;

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    let json = args.iter().any(|a| a == "--json");
    let files: Vec<&String> = args.iter().filter(|a| !a.starts_with("--")).collect();

    if files.is_empty() {
        eprintln!("Usage: frame-inspect [--json] <file.html>...");
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  frame-inspect index.html");
        eprintln!("  frame-inspect --json frames/*.html");
        process::exit(1);
    }

    let mut exit_code = 0;

    for file_path in files {
        let html = match fs::read_to_string(file_path) {
            Ok(html) => html,
            Err(e) => {
                eprintln!("✗ {}: failed to read file: {}", file_path, e);
                exit_code = 1;
                continue;
            }
        };

        let card = decode_html(&html);
        if card.debug.has_problems() {
            exit_code = 1;
        }

        if json {
            match serde_json::to_string_pretty(&card) {
                Ok(out) => println!("{}", out),
                Err(e) => {
                    eprintln!("✗ {}: failed to serialize card: {}", file_path, e);
                    exit_code = 1;
                }
            }
        } else {
            print_summary(file_path, &card);
        }
    }

    process::exit(exit_code);
}

fn print_summary(path: &str, card: &Card) {
    let debug = &card.debug;
    let mark = if debug.has_problems() { "✗" } else { "✓" };
    println!("{} {} ({})", mark, path, card.version);

    if debug.fallback_image_to_url {
        println!("  image:    (missing, clients fall back to og:image '{}')", debug.image);
    } else {
        println!("  image:    {}", card.image_url);
    }
    println!("  post url: {}", card.post_url);
    if let Some(placeholder) = &card.input_text {
        println!("  input:    \"{}\"", placeholder);
    }

    for button in &card.buttons {
        println!("  [{}] {} ({})", button.index, button.title, button.button_type);
    }

    if debug.buttons_are_out_of_order {
        eprintln!("  Buttons are out of order or missing: {:?}", debug.invalid_buttons);
    }
    if debug.post_url_too_long {
        eprintln!("  Post URL is longer than 2048 characters");
    }
    if !debug.unknown_button_actions.is_empty() {
        eprintln!("  Unknown button actions on: {:?}", debug.unknown_button_actions);
    }
    if let Some(version) = &debug.unsupported_version {
        eprintln!("  Unsupported frame version '{}'", version);
    }
}
