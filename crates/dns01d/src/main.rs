// # dns01d - DNS-01 Challenge Runner
//
// Thin one-shot integration layer: it reads its configuration from the
// environment, sets up logging, creates the requested solver through the
// registry and runs a single Present or CleanUp. All DNS logic lives in
// the solver crates; this binary holds no retry logic and no state.
//
// ## Configuration
//
// All configuration is done via environment variables:
//
// ### Runner
// - `DNS01_GROUP_NAME`: API group the solver is published under (required)
// - `DNS01_SOLVER`: Solver name (default: ionos)
// - `DNS01_ACTION`: `present` or `cleanup` (required)
// - `DNS01_MODE`: `live` or `dry-run` (default: live)
// - `DNS01_LOG_LEVEL`: trace, debug, info, warn, error (default: info)
// - `DNS01_HTTP_TIMEOUT_SECS`: Per-request HTTP timeout (default: 30)
//
// ### Challenge
// - `DNS01_RESOLVED_ZONE`: Zone, e.g. `example.com.` (required)
// - `DNS01_RESOLVED_FQDN`: Record name, e.g. `_acme-challenge.example.com.` (required)
// - `DNS01_KEY`: TXT value (required)
// - `DNS01_NAMESPACE`: Namespace for secret lookups (default: default)
// - `DNS01_CONFIG`: Solver configuration as JSON
// - `DNS01_ALLOW_AMBIENT_CREDENTIALS`: `true` to use `IONOS_*` credentials
//
// ### Credentials
// - `DNS01_SECRETS_PATH`: JSON file `{namespace: {name: {key: value}}}`
// - `IONOS_API_URL`, `IONOS_TOKEN`: Ambient endpoint and token
//
// ## Example
//
// ```bash
// export DNS01_GROUP_NAME=acme.example.com
// export DNS01_ACTION=present
// export DNS01_RESOLVED_ZONE=example.com.
// export DNS01_RESOLVED_FQDN=_acme-challenge.example.com.
// export DNS01_KEY=abc123
// export DNS01_CONFIG='{"endpoint":"https://dns.de-fra.ionos.com","apiTokenSecretRef":{"name":"ionos-secret","key":"api-token"}}'
// export DNS01_SECRETS_PATH=/etc/dns01/secrets.json
//
// dns01d
// ```

use anyhow::{Context, Result};
use dns01_core::{
    AmbientCredentials, ChallengeRequest, FileSecretStore, MemorySecretStore, SecretStore,
    SolverRegistry, SolverSettings,
};
use std::env;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Exit codes for different termination scenarios
///
/// - 0: Challenge handled
/// - 1: Configuration, credential or startup error
/// - 2: Runtime error (provider or transport failure)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dns01ExitCode {
    Success = 0,
    ConfigError = 1,
    RuntimeError = 2,
}

impl From<Dns01ExitCode> for ExitCode {
    fn from(code: Dns01ExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Which half of the challenge to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Present,
    CleanUp,
}

/// Runner configuration, read once from the environment
#[derive(Debug)]
struct Config {
    group_name: String,
    solver: String,
    action: String,
    resolved_zone: String,
    resolved_fqdn: String,
    key: String,
    namespace: String,
    solver_config: Option<String>,
    allow_ambient_credentials: bool,
    secrets_path: Option<String>,
    http_timeout_secs: u64,
    mode: String,
    log_level: String,
    ambient: AmbientCredentials,
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let http_timeout_secs = match lookup("DNS01_HTTP_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse().with_context(|| {
                format!("DNS01_HTTP_TIMEOUT_SECS must be a number of seconds. Got: {}", raw)
            })?,
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        let allow_ambient_credentials = match lookup("DNS01_ALLOW_AMBIENT_CREDENTIALS") {
            Some(raw) => raw.trim().to_lowercase().parse().with_context(|| {
                format!(
                    "DNS01_ALLOW_AMBIENT_CREDENTIALS must be 'true' or 'false'. Got: {}",
                    raw
                )
            })?,
            None => false,
        };

        Ok(Self {
            group_name: lookup("DNS01_GROUP_NAME").unwrap_or_default(),
            solver: lookup("DNS01_SOLVER").unwrap_or_else(|| "ionos".to_string()),
            action: lookup("DNS01_ACTION").unwrap_or_default(),
            resolved_zone: lookup("DNS01_RESOLVED_ZONE").unwrap_or_default(),
            resolved_fqdn: lookup("DNS01_RESOLVED_FQDN").unwrap_or_default(),
            key: lookup("DNS01_KEY").unwrap_or_default(),
            namespace: lookup("DNS01_NAMESPACE").unwrap_or_else(|| "default".to_string()),
            solver_config: lookup("DNS01_CONFIG").filter(|s| !s.trim().is_empty()),
            allow_ambient_credentials,
            secrets_path: lookup("DNS01_SECRETS_PATH").filter(|s| !s.is_empty()),
            http_timeout_secs,
            mode: lookup("DNS01_MODE").unwrap_or_else(|| "live".to_string()),
            log_level: lookup("DNS01_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            ambient: AmbientCredentials {
                endpoint: lookup("IONOS_API_URL").filter(|s| !s.is_empty()),
                token: lookup("IONOS_TOKEN").filter(|s| !s.is_empty()),
            },
        })
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        if self.group_name.trim().is_empty() {
            anyhow::bail!(
                "DNS01_GROUP_NAME is required. \
                Set it via: export DNS01_GROUP_NAME=acme.example.com"
            );
        }

        self.action()?;

        for (name, value) in [
            ("DNS01_RESOLVED_ZONE", &self.resolved_zone),
            ("DNS01_RESOLVED_FQDN", &self.resolved_fqdn),
            ("DNS01_KEY", &self.key),
        ] {
            if value.is_empty() {
                anyhow::bail!("{} is required", name);
            }
        }

        if !(1..=300).contains(&self.http_timeout_secs) {
            anyhow::bail!(
                "DNS01_HTTP_TIMEOUT_SECS must be between 1 and 300 seconds. Got: {}",
                self.http_timeout_secs
            );
        }

        match self.mode.as_str() {
            "live" | "dry-run" => {}
            _ => anyhow::bail!(
                "DNS01_MODE '{}' is not valid. Valid modes: live, dry-run",
                self.mode
            ),
        }

        self.parse_log_level()?;

        // surfaces malformed JSON before any solver is created
        self.challenge_request()?;

        Ok(())
    }

    fn action(&self) -> Result<Action> {
        match self.action.to_lowercase().as_str() {
            "present" => Ok(Action::Present),
            "cleanup" | "clean-up" => Ok(Action::CleanUp),
            "" => anyhow::bail!(
                "DNS01_ACTION is required. Set it via: export DNS01_ACTION=present"
            ),
            other => anyhow::bail!(
                "DNS01_ACTION '{}' is not valid. Valid actions: present, cleanup",
                other
            ),
        }
    }

    fn parse_log_level(&self) -> Result<Level> {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Ok(Level::TRACE),
            "debug" => Ok(Level::DEBUG),
            "info" => Ok(Level::INFO),
            "warn" => Ok(Level::WARN),
            "error" => Ok(Level::ERROR),
            _ => anyhow::bail!(
                "DNS01_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                self.log_level
            ),
        }
    }

    fn is_dry_run(&self) -> bool {
        self.mode == "dry-run"
    }

    fn solver_settings(&self) -> SolverSettings {
        SolverSettings::new()
            .with_http_timeout_secs(self.http_timeout_secs)
            .with_dry_run(self.is_dry_run())
            .with_ambient(self.ambient.clone())
    }

    /// The challenge this invocation handles
    fn challenge_request(&self) -> Result<ChallengeRequest> {
        let mut request = ChallengeRequest::new(
            self.resolved_zone.clone(),
            self.resolved_fqdn.clone(),
            self.key.clone(),
        )
        .with_namespace(self.namespace.clone())
        .with_ambient_credentials(self.allow_ambient_credentials);

        if let Some(raw) = &self.solver_config {
            let value: serde_json::Value =
                serde_json::from_str(raw).context("DNS01_CONFIG is not valid JSON")?;
            request = request.with_config(value);
        }

        Ok(request)
    }
}

fn main() -> ExitCode {
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {:#}", e);
            return Dns01ExitCode::ConfigError.into();
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("Configuration validation error: {:#}", e);
        return Dns01ExitCode::ConfigError.into();
    }

    let log_level = config.parse_log_level().unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return Dns01ExitCode::ConfigError.into();
    }

    info!(
        "Starting dns01d for group {} (solver: {})",
        config.group_name, config.solver
    );

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return Dns01ExitCode::RuntimeError.into();
        }
    };

    let code = rt.block_on(async {
        match run(&config).await {
            Ok(()) => Dns01ExitCode::Success,
            Err(e) => {
                error!("Challenge failed: {:#}", e);
                exit_code_for(&e)
            }
        }
    });

    code.into()
}

/// Configuration problems exit with 1, everything else with 2
fn exit_code_for(err: &anyhow::Error) -> Dns01ExitCode {
    match err.downcast_ref::<dns01_core::Error>() {
        Some(e) if e.is_config() => Dns01ExitCode::ConfigError,
        _ => Dns01ExitCode::RuntimeError,
    }
}

fn build_registry() -> SolverRegistry {
    let registry = SolverRegistry::new();

    #[cfg(feature = "ionos")]
    {
        info!("Registering IONOS solver");
        dns01_provider_ionos::register(&registry);
    }

    registry
}

async fn load_secrets(config: &Config) -> Result<Arc<dyn SecretStore>> {
    match &config.secrets_path {
        Some(path) => {
            let store = FileSecretStore::load(path).await?;
            info!("Loaded secrets from {}", store.path().display());
            Ok(Arc::new(store))
        }
        None => Ok(Arc::new(MemorySecretStore::new())),
    }
}

/// Run a single Present or CleanUp
async fn run(config: &Config) -> Result<()> {
    let registry = build_registry();
    let solver = registry.create_solver(&config.solver, &config.solver_settings())?;

    solver.initialize(load_secrets(config).await?).await?;

    let request = config.challenge_request()?;
    let outcome = match config.action()? {
        Action::Present => solver.present(&request).await?,
        Action::CleanUp => solver.clean_up(&request).await?,
    };

    info!(
        "{} finished for {} (changed: {}): {:?}",
        config.action,
        config.resolved_fqdn,
        outcome.changed(),
        outcome
    );
    Ok(())
}
