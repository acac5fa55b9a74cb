//! Interactive credential prompt.
//!
//! Two required fields: a visible username and a masked password. No side
//! effects beyond terminal I/O; cancelled or empty input maps to the prompt
//! stage of [`RunError`].

use dialoguer::{Input, Password};
use followcheck_common::{Result, RunError};

pub struct Credentials {
    pub username: String,
    pub password: String,
}

pub fn read_credentials() -> Result<Credentials> {
    let username: String = Input::new()
        .with_prompt("username")
        .validate_with(|input: &String| {
            if input.trim().is_empty() {
                Err("username is required")
            } else {
                Ok(())
            }
        })
        .interact_text()
        .map_err(|e| RunError::Prompt(e.to_string()))?;

    let password = Password::new()
        .with_prompt("password")
        .interact()
        .map_err(|e| RunError::Prompt(e.to_string()))?;
    if password.is_empty() {
        return Err(RunError::Prompt("password is required".into()));
    }

    Ok(Credentials {
        username: username.trim().to_string(),
        password,
    })
}
