//! Native probe: boots one tab against the configured API and reports the
//! corrected time and where each page would land.
//!
//! Usage: `frontdesk-probe [role] [path...]`

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use frontdesk_auth::{Identity, MemoryStorage};
    use frontdesk_core::{ClientConfig, Role};

    frontdesk_observability::init();

    let mut args = std::env::args().skip(1);
    let role: Option<Role> = args
        .next()
        .map(|raw| raw.parse())
        .transpose()
        .context("first argument must be guest, clerk or manager")?;

    let host = std::env::var("FRONTDESK_HOST").unwrap_or_else(|_| "localhost".to_string());
    let config = ClientConfig::from_env(host);
    tracing::info!(api = %config.api_base_url, mode = ?config.mode, "probing");

    let mut ctx = frontdesk_web::boot_http(config, MemoryStorage::new()).await;
    println!(
        "corrected time: {} (offset {} ms, synced: {})",
        ctx.now().to_rfc3339(),
        ctx.clock().offset_millis(),
        ctx.clock().is_synced()
    );

    if let Some(role) = role {
        let nav = ctx.login(Identity::new(role));
        println!("logged in as {role}, landing on {}", nav.path);
    }

    let mut paths: Vec<String> = args.collect();
    if paths.is_empty() {
        paths = ctx
            .guard()
            .routes()
            .routes()
            .iter()
            .map(|route| route.path.to_string())
            .collect();
    }

    for path in paths {
        let nav = ctx.settle(&path);
        match nav.notice {
            Some(notice) => println!("{path} -> {} ({notice})", nav.path),
            None => println!("{path} -> {}", nav.path),
        }
    }

    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {}
