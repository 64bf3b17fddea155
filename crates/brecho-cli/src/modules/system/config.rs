use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::types::{CliConfig, CliContext};
use crate::cli_args::{ConfigArgs, ConfigCommand};
use crate::{API_URL_ENV, DEFAULT_ADDR, HOSTNAME_ENVS, PRODUCTION_ADDR, PRODUCTION_DOMAIN};

pub(crate) fn handle_config_command(
    args: ConfigArgs,
    config: &mut CliConfig,
) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::SetContext(args) => {
            let entry = config
                .contexts
                .entry(args.name.clone())
                .or_insert_with(|| CliContext {
                    addr: DEFAULT_ADDR.to_string(),
                    operator: None,
                });
            if let Some(addr) = args.addr {
                entry.addr = addr;
            }
            if let Some(operator) = args.operator {
                entry.operator = Some(operator);
            }
            config.current_context = Some(args.name);
        }
        ConfigCommand::UseContext(args) => {
            if !config.contexts.contains_key(&args.name) {
                anyhow::bail!("context not found: {}", args.name);
            }
            config.current_context = Some(args.name);
        }
        ConfigCommand::CurrentContext => {
            if let Some(current) = config.current_context.clone() {
                println!("{current}");
            }
        }
        ConfigCommand::GetContexts => {
            let mut names: Vec<_> = config.contexts.keys().cloned().collect();
            names.sort();
            for name in names {
                println!("{name}");
            }
        }
    }
    Ok(())
}

fn config_path() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| anyhow::anyhow!("HOME is not set"))?;
    Ok(Path::new(&home).join(".brecho").join("config.json"))
}

pub(crate) fn load_config() -> anyhow::Result<CliConfig> {
    let path = config_path()?;
    if !path.exists() {
        return Ok(CliConfig::default());
    }
    let contents = fs::read_to_string(path)?;
    let config = serde_json::from_str(&contents)?;
    Ok(config)
}

pub(crate) fn save_config(config: &CliConfig) -> anyhow::Result<()> {
    let path = config_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let contents = serde_json::to_string_pretty(config)?;
    fs::write(path, contents)?;
    Ok(())
}

/// API base URL: `--addr`, then the production endpoint when running on a
/// production host, then `BRECHO_API_URL`, then the context, then the default.
pub(crate) fn resolve_addr(addr_arg: Option<String>, context: Option<&CliContext>) -> String {
    let hostname = HOSTNAME_ENVS
        .iter()
        .find_map(|name| std::env::var(name).ok());
    let env_url = std::env::var(API_URL_ENV).ok();
    let addr = pick_addr(addr_arg, hostname.as_deref(), env_url, context);
    debug!(addr = %addr, "api address resolved");
    addr
}

fn pick_addr(
    addr_arg: Option<String>,
    hostname: Option<&str>,
    env_url: Option<String>,
    context: Option<&CliContext>,
) -> String {
    if let Some(addr) = addr_arg {
        return addr;
    }
    if hostname.is_some_and(is_production_host) {
        return PRODUCTION_ADDR.to_string();
    }
    env_url
        .filter(|url| !url.trim().is_empty())
        .or_else(|| context.map(|ctx| ctx.addr.clone()))
        .unwrap_or_else(|| DEFAULT_ADDR.to_string())
}

pub(crate) fn is_production_host(hostname: &str) -> bool {
    let hostname = hostname.trim().trim_end_matches('.').to_ascii_lowercase();
    hostname == PRODUCTION_DOMAIN || hostname.ends_with(&format!(".{PRODUCTION_DOMAIN}"))
}

pub(crate) fn ensure_secure_addr(addr: &str, allow_insecure: bool) -> anyhow::Result<()> {
    if addr.starts_with("http://") && !allow_insecure && !is_loopback(addr) {
        anyhow::bail!("refusing to use http:// without --insecure");
    }
    Ok(())
}

fn is_loopback(addr: &str) -> bool {
    let rest = addr.trim_start_matches("http://");
    let authority = rest.split('/').next().unwrap_or_default();
    let host = if authority.starts_with('[') {
        authority
            .split_once(']')
            .map_or(authority, |(host, _)| host.trim_start_matches('['))
    } else {
        authority.split(':').next().unwrap_or_default()
    };
    matches!(host, "localhost" | "127.0.0.1" | "::1")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli_args::{SetContextArgs, UseContextArgs};

    fn context(addr: &str) -> CliContext {
        CliContext {
            addr: addr.to_string(),
            operator: Some("ana".to_string()),
        }
    }

    #[test]
    fn addr_flag_wins_over_everything() {
        let addr = pick_addr(
            Some("https://staging.example".to_string()),
            Some("loja.brecho.app"),
            Some("https://env.example".to_string()),
            Some(&context("https://ctx.example")),
        );
        assert_eq!(addr, "https://staging.example");
    }

    #[test]
    fn production_host_overrides_env_and_context() {
        let addr = pick_addr(
            None,
            Some("Loja.Brecho.App"),
            Some("https://env.example".to_string()),
            Some(&context("https://ctx.example")),
        );
        assert_eq!(addr, PRODUCTION_ADDR);
    }

    #[test]
    fn env_then_context_then_default() {
        let ctx = context("https://ctx.example");
        assert_eq!(
            pick_addr(None, Some("laptop"), Some("https://env.example".to_string()), Some(&ctx)),
            "https://env.example"
        );
        assert_eq!(
            pick_addr(None, None, Some("  ".to_string()), Some(&ctx)),
            "https://ctx.example"
        );
        assert_eq!(pick_addr(None, None, None, None), DEFAULT_ADDR);
    }

    #[test]
    fn production_host_matching() {
        assert!(is_production_host("brecho.app"));
        assert!(is_production_host("web-1.brecho.app."));
        assert!(!is_production_host("notbrecho.app"));
        assert!(!is_production_host("localhost"));
    }

    #[test]
    fn plain_http_only_allowed_on_loopback() {
        assert!(ensure_secure_addr("http://127.0.0.1:8000", false).is_ok());
        assert!(ensure_secure_addr("http://localhost/api", false).is_ok());
        assert!(ensure_secure_addr("http://[::1]:8000", false).is_ok());
        assert!(ensure_secure_addr("https://api.brecho.app", false).is_ok());
        assert!(ensure_secure_addr("http://192.168.0.10:8000", false).is_err());
        assert!(ensure_secure_addr("http://192.168.0.10:8000", true).is_ok());
    }

    #[test]
    fn config_commands_manage_contexts() {
        let mut config = CliConfig::default();
        handle_config_command(
            ConfigArgs {
                command: ConfigCommand::SetContext(SetContextArgs {
                    name: "loja".to_string(),
                    addr: Some("https://api.example".to_string()),
                    operator: Some("bia".to_string()),
                }),
            },
            &mut config,
        )
        .expect("set-context");
        let entry = config.contexts.get("loja").expect("context");
        assert_eq!(entry.addr, "https://api.example");
        assert_eq!(entry.operator.as_deref(), Some("bia"));
        assert_eq!(config.current_context.as_deref(), Some("loja"));

        let missing = handle_config_command(
            ConfigArgs {
                command: ConfigCommand::UseContext(UseContextArgs {
                    name: "outra".to_string(),
                }),
            },
            &mut config,
        );
        assert!(missing.is_err());
        assert_eq!(config.current_context.as_deref(), Some("loja"));
    }
}
