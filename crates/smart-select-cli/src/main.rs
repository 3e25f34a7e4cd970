use smart_select::{ModelsConfig, ResolveOptions, Resolver};

fn main() {
    tracing_subscriber::fmt::init();

    let models_path =
        std::env::var("SMART_SELECT_MODELS").unwrap_or_else(|_| "models.yaml".into());
    let strict = match std::env::var("SMART_SELECT_STRICT") {
        Ok(value) => parse_flag(&value).unwrap_or_else(|| {
            tracing::warn!(value = %value, "SMART_SELECT_STRICT not a boolean, using false");
            false
        }),
        Err(_) => false,
    };

    let mut args = std::env::args().skip(1);
    let (Some(model), Some(text)) = (args.next(), args.next()) else {
        eprintln!("usage: smart-select <model> <text>");
        std::process::exit(2);
    };

    let models = ModelsConfig::from_path(&models_path)
        .and_then(|config| config.build())
        .unwrap_or_else(|e| {
            eprintln!("failed to load models from {models_path}: {e}");
            std::process::exit(1);
        });
    tracing::info!(path = %models_path, models = models.len(), strict, "loaded models");

    let resolver = Resolver::new(&models).with_options(ResolveOptions { strict });
    let plan = resolver.select(&model, &text).unwrap_or_else(|e| {
        match std::error::Error::source(&e) {
            Some(cause) => eprintln!("{model}: {e}: {cause}"),
            None => eprintln!("{model}: {e}"),
        }
        std::process::exit(1);
    });

    match serde_json::to_string_pretty(&plan) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("failed to serialize plan: {e}");
            std::process::exit(1);
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
