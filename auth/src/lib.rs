#[macro_use]
extern crate log;

use actix_identity::{CookieIdentityPolicy, IdentityService};
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand_core::{OsRng, RngCore};

use errors::Error;

pub const SESSION_NAME: &str = "auth";

const MIN_KEY_LENGTH: usize = 32;
const GENERATED_KEY_LENGTH: usize = 64;

/// What a route asks of the current user before it runs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Requirement {
    Session,
    Expert,
    Admin,
}

/// Where a user who fails a [`Requirement`] gets sent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Denied {
    Login,
    Home,
}

impl Denied {
    pub fn location(&self) -> &'static str {
        match self {
            Denied::Login => "/login",
            Denied::Home => "/",
        }
    }
}

pub trait RoleFlags {
    fn is_expert(&self) -> bool;
    fn is_admin(&self) -> bool;
}

/// Anonymous visitors go to the login page, signed in users missing the
/// role go home.
pub fn authorize<U: RoleFlags>(user: Option<U>, requirement: Requirement) -> Result<U, Denied> {
    let user = user.ok_or(Denied::Login)?;
    let allowed = match requirement {
        Requirement::Session => true,
        Requirement::Expert => user.is_expert(),
        Requirement::Admin => user.is_admin(),
    };

    if allowed {
        Ok(user)
    } else {
        Err(Denied::Home)
    }
}

pub fn hash_password(password: &str) -> Result<String, Error> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| Error::PasswordHashError(e.to_string()))
}

pub fn verify_password(hash: &str, password: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            warn!("Stored password hash could not be parsed - {}", e);
            false
        }
    }
}

/// Cookie key for the session. A configured key shorter than 32 bytes is
/// ignored in favour of a fresh random one, which logs everyone out on restart.
pub fn session_key(configured: Option<&str>) -> Vec<u8> {
    match configured {
        Some(key) if key.len() >= MIN_KEY_LENGTH => key.as_bytes().to_vec(),
        Some(_) => {
            warn!(
                "SESSION_KEY must be at least {} bytes, generating one instead",
                MIN_KEY_LENGTH
            );
            generate_key()
        }
        None => {
            info!("No SESSION_KEY set, generating one for this process");
            generate_key()
        }
    }
}

fn generate_key() -> Vec<u8> {
    let mut key = vec![0u8; GENERATED_KEY_LENGTH];
    OsRng.fill_bytes(&mut key);
    key
}

pub fn get_identity_service(key: &[u8]) -> IdentityService<CookieIdentityPolicy> {
    IdentityService::new(
        CookieIdentityPolicy::new(key)
            .name(SESSION_NAME)
            .path("/")
            // allow to transmit over http
            .secure(false),
    )
}
