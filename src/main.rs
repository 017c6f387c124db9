use anyhow::{Context, Result};
use etiquette::color_utils;
use etiquette::config::Config;
use etiquette::host::HostContext;
use etiquette::{bootstrap, manifest};
use std::env;

fn usage() {
    eprintln!("Usage: etiquette <COMMAND>");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  contrast <COLOR>...    pick black or white text for each background color");
    eprintln!("  tag-color <NAME>...    chip color and text color for tag names");
    eprintln!("  manifest               print the host-facing manifest");
    eprintln!("  hooks [OPTIONS]        print the registration bundle for a synthetic host");
    eprintln!("      --inactive            leave the plugin deactivated");
    eprintln!("      --multi-entity        session spans multiple entities");
    eprintln!("      --itemtype <T>        itemtype the current request renders");
    eprintln!("      --with <p,q>          peer plugins active on the host");
    eprintln!("      --host-version <V>    host version to report (default 9.4.6)");
    eprintln!("  check <HOST_VERSION>   verify a host version against the requirements");
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "etiquette=info".into()),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    let Some(command) = args.get(1) else {
        usage();
        return Ok(());
    };

    match command.as_str() {
        "contrast" => cmd_contrast(&args[2..]),
        "tag-color" => cmd_tag_color(&args[2..]),
        "manifest" => cmd_manifest(),
        "hooks" => cmd_hooks(&args[2..]),
        "check" => cmd_check(&args[2..]),
        _ => {
            usage();
            Ok(())
        }
    }
}

fn cmd_contrast(colors: &[String]) -> Result<()> {
    if colors.is_empty() {
        usage();
        return Ok(());
    }
    for raw in colors {
        let text = color_utils::ideal_text_color_hex(raw).with_context(|| format!("color {raw:?}"))?;
        println!("{raw} {text}");
    }
    Ok(())
}

fn cmd_tag_color(names: &[String]) -> Result<()> {
    if names.is_empty() {
        usage();
        return Ok(());
    }
    let config = Config::load().unwrap_or_default();
    for name in names {
        let chip = config.effective_tag_color(name);
        let text = color_utils::ideal_text_color(chip);
        println!("{name} {chip} {text}");
    }
    Ok(())
}

fn cmd_manifest() -> Result<()> {
    let map = manifest::PluginManifest::current().to_host_map()?;
    println!("{}", serde_json::to_string_pretty(&map)?);
    Ok(())
}

fn cmd_hooks(flags: &[String]) -> Result<()> {
    let mut host = HostContext::new("9.4.6");
    let mut activate_self = true;

    let mut iter = flags.iter();
    while let Some(flag) = iter.next() {
        match flag.as_str() {
            "--inactive" => activate_self = false,
            "--multi-entity" => host.multi_entity_session = true,
            "--itemtype" => host.current_itemtype = iter.next().cloned(),
            "--with" => {
                if let Some(list) = iter.next() {
                    for peer in list.split(',').filter(|p| !p.is_empty()) {
                        host.activate(peer);
                    }
                }
            }
            "--host-version" => {
                if let Some(version) = iter.next() {
                    host.version = version.clone();
                }
            }
            other => {
                eprintln!("Unknown option: {other}");
                usage();
                return Ok(());
            }
        }
    }

    if activate_self {
        host.activate(manifest::PLUGIN_KEY);
    }
    if host.plugin_active("uninstall") && host.uninstall_types.is_empty() {
        // Preview data; on a real host the uninstall peer supplies the list.
        host.uninstall_types = vec!["Computer".to_string(), "Printer".to_string()];
    }

    let config = Config::load().unwrap_or_default();
    let bundle = bootstrap::init(&host, &config).to_host_map();
    println!("{}", serde_json::to_string_pretty(&bundle)?);
    Ok(())
}

fn cmd_check(args: &[String]) -> Result<()> {
    let Some(version) = args.first() else {
        usage();
        return Ok(());
    };
    manifest::check_prerequisites(&HostContext::new(version))?;
    println!("host {version} is supported");
    Ok(())
}
