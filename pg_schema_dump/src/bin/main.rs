use std::process::ExitCode;

use chrono::Local;
use structopt::StructOpt;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use pg_schema_dump::{
	output::output_root,
	ExtractionOrchestrator,
	Opt,
	Result,
};

fn main() -> ExitCode {
	let opt = Opt::from_args();
	init_logging(&opt.log_level);

	let cancel = setup_signal_handler().unwrap_or_else(|e| {
		warn!("signal handlers not installed, Ctrl-C ends the process without cleanup: {}", e);
		CancellationToken::new()
	});

	match run(&opt, cancel) {
		Ok(()) => ExitCode::SUCCESS,
		Err(e) => {
			eprintln!("{}", e.format_detailed());
			ExitCode::from(e.exit_code())
		},
	}
}

fn run(opt: &Opt, cancel: CancellationToken) -> Result<()> {
	let params = opt.connection_params()?;
	let run_date = opt.date.unwrap_or_else(|| Local::now().date_naive());
	let orchestrator = ExtractionOrchestrator::new(params, output_root(&opt.output, run_date))
		.with_cancellation(cancel);
	info!(output = %orchestrator.output_dir().display(), "writing definitions");

	if opt.mode.includes_functions() {
		orchestrator.extract_functions()?;
	}
	if opt.mode.includes_tables() {
		orchestrator.extract_tables()?;
	}
	Ok(())
}

fn init_logging(level: &str) {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.init();
}

/// Cancels the returned token on the first SIGINT/SIGTERM (Ctrl-C on Windows), the pass then stops
/// before its next schema or file. A second signal exits right away.
fn setup_signal_handler() -> std::io::Result<CancellationToken> {
	let cancel_token = CancellationToken::new();
	let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
	let mut signals = {
		let _guard = runtime.enter();
		ShutdownSignals::new()?
	};

	let token = cancel_token.clone();
	std::thread::Builder::new()
		.name("signal-handler".to_owned())
		.spawn(move || {
			runtime.block_on(async move {
				let name = signals.recv().await;
				eprintln!("\nReceived {}. Stopping after the current file...", name);
				token.cancel();

				let name = signals.recv().await;
				eprintln!("\nReceived {} again. Exiting.", name);
				std::process::exit(130);
			})
		})?;

	Ok(cancel_token)
}

#[cfg(unix)]
struct ShutdownSignals {
	sigint: tokio::signal::unix::Signal,
	sigterm: tokio::signal::unix::Signal,
}

#[cfg(unix)]
impl ShutdownSignals {
	fn new() -> std::io::Result<Self> {
		use tokio::signal::unix::{signal, SignalKind};
		Ok(ShutdownSignals {
			sigint: signal(SignalKind::interrupt())?,
			sigterm: signal(SignalKind::terminate())?,
		})
	}

	async fn recv(&mut self) -> &'static str {
		tokio::select! {
			_ = self.sigint.recv() => "SIGINT",
			_ = self.sigterm.recv() => "SIGTERM",
		}
	}
}

#[cfg(not(unix))]
struct ShutdownSignals;

#[cfg(not(unix))]
impl ShutdownSignals {
	fn new() -> std::io::Result<Self> {
		Ok(ShutdownSignals)
	}

	async fn recv(&mut self) -> &'static str {
		let _ = tokio::signal::ctrl_c().await;
		"Ctrl-C"
	}
}
