// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! docman CLI
//!
//! Signs in as a user, resolves that user's abilities against the policy
//! backend and renders categories, documents and roles with only the actions
//! the user is allowed to take.

mod commands;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use docman_client::{HttpPolicyApi, ResolutionOutcome, Session};
use docman_config::{DocmanConfig, LogFormat, LoggingConfig};
use docman_policy_core::UserId;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::commands::{CategoriesCommand, CheckArgs, DocumentsCommand, RolesCommand, UsersCommand};

#[derive(Parser, Debug)]
#[command(name = "docman", version, about, long_about = None)]
struct Args {
	/// Path to custom configuration file
	#[arg(short, long)]
	config: Option<PathBuf>,

	/// User id to act as
	#[arg(short, long, env = "DOCMAN_USER_ID")]
	user: Option<String>,

	/// Policy backend URL (overrides config)
	#[arg(long)]
	base_url: Option<String>,

	/// Log level (overrides config)
	#[arg(short, long)]
	log_level: Option<String>,

	/// Output logs as JSON (overrides config)
	#[arg(long)]
	json_logs: bool,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// List, create or delete categories
	#[command(subcommand)]
	Categories(CategoriesCommand),
	/// List, create, delete or share documents
	#[command(subcommand)]
	Documents(DocumentsCommand),
	/// Manage roles
	#[command(subcommand)]
	Roles(RolesCommand),
	/// List users and assign roles
	#[command(subcommand)]
	Users(UsersCommand),
	/// Ask the backend for live permission decisions
	Check(CheckArgs),
	/// Show the resolved ability rules
	Abilities,
	/// Show collection totals
	Dashboard,
}

fn init_tracing(logging: &LoggingConfig) {
	let directives = if logging.level.contains('=') {
		logging.level.clone()
	} else {
		format!("docman={0},docman_client={0},docman_config={0}", logging.level)
	};
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives));

	match logging.format {
		LogFormat::Json => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().json().with_writer(std::io::stderr))
				.init();
		}
		LogFormat::Compact => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().compact().with_writer(std::io::stderr))
				.init();
		}
		LogFormat::Pretty => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().pretty().with_writer(std::io::stderr))
				.init();
		}
	}
}

fn load_config(args: &Args) -> Result<DocmanConfig> {
	let mut config = match &args.config {
		Some(path) => docman_config::load_config_with_file(path),
		None => docman_config::load_config(),
	}
	.context("failed to load configuration")?;

	if let Some(base_url) = &args.base_url {
		config.api.base_url = base_url.trim_end_matches('/').to_string();
	}
	if let Some(level) = &args.log_level {
		config.logging.level = level.clone();
	}
	if args.json_logs {
		config.logging.format = LogFormat::Json;
	}
	Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
	let args = Args::parse();
	let config = load_config(&args)?;
	init_tracing(&config.logging);

	let api = HttpPolicyApi::from_config(&config.api).context("failed to create API client")?;
	let session = Session::new(Arc::new(api));

	let user = args
		.user
		.as_deref()
		.context("no user given, pass --user or set DOCMAN_USER_ID")?;
	let identity = UserId::new(user).context("invalid user id")?;

	info!(base_url = %config.api.base_url, user_id = %identity, "starting docman");
	if let ResolutionOutcome::Applied { rules } = session.sign_in(identity).await {
		info!(rules, "abilities resolved");
	}

	let result = match args.command {
		Command::Categories(cmd) => commands::categories::run(&session, cmd).await,
		Command::Documents(cmd) => commands::documents::run(&session, cmd).await,
		Command::Roles(cmd) => commands::roles::run(&session, cmd).await,
		Command::Users(cmd) => commands::users::run(&session, cmd).await,
		Command::Check(check) => commands::check::run(&session, check).await,
		Command::Abilities => commands::check::abilities(&session),
		Command::Dashboard => commands::dashboard::run(&session).await,
	};

	session.sign_out();
	result
}
