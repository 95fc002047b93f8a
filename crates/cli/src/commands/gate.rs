//! Demo login gate commands.
//!
//! # Usage
//!
//! ```bash
//! bite register asha --password pa55
//! bite login asha --password pa55
//! ```

use bite_client::{GateError, LocalStorage, LoginGate};

/// Store the demo username/password pair.
///
/// # Errors
///
/// Returns `GateError` if a field is blank or the pair cannot be saved.
pub fn register(storage: &mut LocalStorage, username: &str, password: &str) -> Result<(), GateError> {
    let next = LoginGate::new(storage).register(username, password)?;

    #[allow(clippy::print_stdout)]
    {
        println!("Registered {}. Next: {next}", username.trim());
    }
    Ok(())
}

/// Check a login attempt against the stored pair.
///
/// # Errors
///
/// Returns `GateError` if nothing is registered or the pair does not match.
pub fn login(storage: &mut LocalStorage, username: &str, password: &str) -> Result<(), GateError> {
    let next = LoginGate::new(storage).login(username, password)?;

    #[allow(clippy::print_stdout)]
    {
        println!("Welcome, {}. Next: {next}", username.trim());
    }
    Ok(())
}
