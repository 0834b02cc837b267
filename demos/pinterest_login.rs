//! Builds a Pinterest strategy, prints the authorization redirect, and optionally fetches the
//! profile behind `PINTEREST_ACCESS_TOKEN`.

// std
use std::{collections::HashMap, env};
// crates.io
use color_eyre::Result;
// self
use oauth2_pinterest::{
	auth::{ScopeList, TokenGrant},
	config::StrategyOptions,
	error::Error,
	strategy::{Profile, StrategyBuilder, VerifyOutcome},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let client_id = env::var("PINTEREST_CLIENT_ID").unwrap_or_else(|_| "demo-client".into());
	let client_secret =
		env::var("PINTEREST_CLIENT_SECRET").unwrap_or_else(|_| "demo-secret".into());
	let callback_url = "https://app.example.com/auth/pinterest/callback";
	let options = StrategyOptions::new(client_id, client_secret, callback_url)
		.scope(ScopeList::new(["user_accounts:read", "pins:read"])?);
	let strategy = StrategyBuilder::new(options)
		.verify(|grant: TokenGrant, profile: Profile| async move {
			println!("Verifying {} (token issued at {}).", profile.id, grant.issued_at);

			Ok::<_, Error>(VerifyOutcome::authenticated(profile.id.to_string()))
		})
		.build()?;
	let request = strategy.authorization_request();

	println!("Send your user to {}.", request.authorize_url);

	let mut sessions = HashMap::new();

	sessions.insert(request.session_key.clone(), request.clone());

	// Simulate the callback handler reading the stashed request back.
	if let Some(stashed) = sessions.remove(&request.session_key) {
		stashed.validate_state(&request.state)?;
		println!("Validated state stored under `{}`.", stashed.session_key);
	}

	match env::var("PINTEREST_ACCESS_TOKEN") {
		Ok(token) => {
			let profile = strategy.user_profile(&token).await?;

			println!(
				"Signed in as {} ({}).",
				profile.display_name.as_deref().unwrap_or("<no username>"),
				profile.id
			);
		},
		Err(_) => println!("Set PINTEREST_ACCESS_TOKEN to fetch a live profile."),
	}

	Ok(())
}
