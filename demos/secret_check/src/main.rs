//! Secret Check Example
//!
//! Holds a `Config { secret }` in a live holder, validates the secret, then
//! rotates it and prints the new value.
//!
//! ```text
//! local() ─▶ watch() ─▶ init_data({secret}) ─▶ get ─▶ validate ─▶ update ─▶ get
//!                                                                   │
//!                                                  queue ─▶ watcher thread logs it
//! ```
//!
//! # Usage
//!
//! ```bash
//! cargo run --package secret-check
//! cargo run --package secret-check -- --secret short --log-level debug
//! ```

use std::thread;

use anyhow::{Result, anyhow};
use clap::Parser;
use livecfg::errorx;
use livecfg::prelude::*;
use tracing::{debug, error, info, warn};

const ERR_CODE_SECRET_TOO_SHORT: i32 = 1001;
const MIN_SECRET_LEN: usize = 8;

#[derive(Parser, Debug)]
#[command(name = "secret-check", about = "Validate and rotate a live secret")]
struct Args {
    /// Initial secret
    #[arg(long, default_value = "hello world")]
    secret: String,

    /// Secret written by the rotation step
    #[arg(long, default_value = "updated secret")]
    rotate_to: String,

    /// Settings profile (overrides LIVECFG_PROFILE)
    #[arg(long)]
    profile: Option<String>,

    /// Base log level (overrides settings files and LIVECFG_LOGGING__LEVEL)
    #[arg(long)]
    log_level: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, ZeroValue)]
struct Secret(String);

impl Secret {
    fn validate(&self) -> errorx::Result<()> {
        if self.0.len() < MIN_SECRET_LEN {
            return Err(coded!(ERR_CODE_SECRET_TOO_SHORT, "invalid secret {}", self.0));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, ZeroValue)]
struct Config {
    secret: Secret,
}

/// Renders `err` as a one-line report; the stack goes to the debug log.
fn report(step: &str, err: &errorx::Error) -> String {
    debug!(step, stack = %err.stack(), "Error stack");
    format!("{step} error: {err}")
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut loader = SettingsLoader::new();
    if let Some(profile) = &args.profile {
        loader = loader.profile(profile);
    }
    if let Some(level) = &args.log_level {
        loader = loader.set("logging.level", level);
    }
    let settings = loader.load()?;
    init_from_config(&settings.logging);

    let conf = config::local::<Config>().watch().init_data(Config {
        secret: Secret(args.secret),
    });

    let (mut changes, cancel) = conf.on_change_queued(settings.notify.queue_capacity);
    let watcher = thread::spawn(move || {
        while let Some(changed) = changes.blocking_recv() {
            info!(len = changed.secret.0.len(), "Secret changed");
        }
        debug!("Change queue closed");
    });

    let secret = conf.get().secret;
    if let Err(err) = secret.validate() {
        warn!(code = err.code(), "Secret failed validation");
        println!("{}", report("validate", &err));
    }

    match conf.update(Config {
        secret: Secret(args.rotate_to),
    }) {
        Ok(()) => println!("Secret updated to: {}", conf.get().secret.0),
        Err(err) => {
            error!(code = err.code(), error = %err, "Update failed");
            println!("{}", report("update", &err));
        }
    }

    cancel.cancel();
    watcher
        .join()
        .map_err(|_| anyhow!("change watcher panicked"))?;

    Ok(())
}
