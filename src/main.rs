use anyhow::Context as _;
use std::io::Read as _;
use wiki_tokenizer::wikitext::{Configuration, EntitySet, Tokenizer, inspect};

/// How to print the tokens.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum OutputMode {
    /// One token per line, indented.
    Inspect,
    /// A JSON array.
    Json,
    /// Only verify that the tokens reproduce the input.
    Check,
}

fn usage<T>(err: &'static str) -> anyhow::Result<T> {
    let exe = std::env::args().next().unwrap_or_default();
    println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    println!("Usage: {exe} [options] [<input.wiki>]\n");
    println!("The input is read from WIKI_TOKENIZER_INPUT, or stdin, if no");
    println!("file is given.\n");
    println!("Options:");
    println!("    --json: Print the tokens as JSON");
    println!("    --check: Only check that the tokens reproduce the input");
    println!(
        "    --max-depth <n>: Nesting limit (default: {}, at most: {})",
        Configuration::DEFAULT_MAX_DEPTH,
        Configuration::MAX_DEPTH_LIMIT
    );
    println!("    --html5-entities: Accept HTML5 named entities");
    println!("    --no-memo: Do not remember failed template routes\n");
    Err(anyhow::Error::msg(err))
}

fn read_input(args: &mut pico_args::Arguments) -> anyhow::Result<String> {
    let path = if let Some(path) = args.opt_free_from_str::<String>()? {
        Some(path)
    } else {
        std::env::var("WIKI_TOKENIZER_INPUT").ok()
    };

    match path.as_deref() {
        None | Some("-") => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("could not read stdin")?;
            Ok(text)
        }
        Some(path) => std::fs::read_to_string(path).with_context(|| format!("could not read {path}")),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("warn"));

    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return usage("Help requested");
    }

    let mode = if args.contains("--json") {
        OutputMode::Json
    } else if args.contains("--check") {
        OutputMode::Check
    } else {
        OutputMode::Inspect
    };

    let mut config = Configuration::default();
    if let Some(max_depth) = args.opt_value_from_str::<_, usize>("--max-depth")? {
        if max_depth > Configuration::MAX_DEPTH_LIMIT {
            log::warn!(
                "--max-depth {max_depth} is above the highest supported limit; using {}",
                Configuration::MAX_DEPTH_LIMIT
            );
        }
        config.max_depth = max_depth;
    }
    if args.contains("--html5-entities") {
        config.entities = EntitySet::Html5;
    }
    if args.contains("--no-memo") {
        config.memoize_bad_routes = false;
    }
    let _ = args.contains("--");

    let input = read_input(&mut args)?;

    if !args.finish().is_empty() {
        return usage("Unknown extra arguments passed");
    }

    let tokens = Tokenizer::new(&config, &input).tokenize()?;

    match mode {
        OutputMode::Inspect => print!("{}", inspect(&tokens)),
        OutputMode::Json => println!("{}", serde_json::to_string_pretty(&tokens)?),
        OutputMode::Check => {
            let source = tokens.iter().map(ToString::to_string).collect::<String>();
            if source != input {
                anyhow::bail!("tokens do not reproduce the input");
            }
            println!("OK: {} tokens", tokens.len());
        }
    }

    Ok(())
}
