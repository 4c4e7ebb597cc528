//! Authentication commands.

use shopfront_client::api::types::{LoginRequest, Registration};
use shopfront_client::error::ApiError;
use shopfront_core::Email;

use super::Storefront;

/// Log in and store the session.
pub async fn login(
    storefront: &Storefront,
    username: String,
    password: String,
) -> Result<(), ApiError> {
    let response = storefront
        .auth
        .login(&LoginRequest { username, password })
        .await?;

    match response.user {
        Some(user) => println!("Logged in as {}.", user.username),
        None => println!("Logged in."),
    }

    Ok(())
}

/// Register a new account and log straight in.
pub async fn register(
    storefront: &Storefront,
    username: String,
    email: &str,
    password: String,
    password_confirm: String,
) -> Result<(), ApiError> {
    let registration = Registration {
        username,
        email: Email::parse(email)?,
        password,
        password_confirm,
    };

    let response = storefront.auth.register(&registration).await?;

    match response.user {
        Some(user) => println!("Registration successful. Logged in as {}.", user.username),
        None => println!("Registration successful."),
    }

    Ok(())
}

/// Log out and clear the stored session.
pub fn logout(storefront: &Storefront) {
    storefront.session.logout();
    println!("Logged out.");
}

/// Print the currently logged-in user.
pub fn whoami(storefront: &Storefront) {
    if !storefront.session.is_authenticated() {
        println!("Not logged in.");
        return;
    }

    match storefront.session.current_user() {
        Some(user) => println!("{} <{}>", user.username, user.email),
        None => println!("Logged in (no user record stored)."),
    }
}
