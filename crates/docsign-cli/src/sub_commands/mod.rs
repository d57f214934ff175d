use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::{bail, Result};

pub mod fetch;
pub mod sign;
pub mod status;

/// Read one line from stdin after printing `label`
pub fn prompt(label: &str) -> Result<String> {
    print!("{label}: ");
    io::stdout().flush()?;

    let mut user_input = String::new();
    if io::stdin().read_line(&mut user_input)? == 0 {
        bail!("No input for {label}");
    }

    Ok(user_input.trim_end_matches(['\r', '\n']).to_string())
}

/// Read a secret from stdin, with echo turned off on a terminal
pub fn prompt_secret(label: &str) -> Result<String> {
    if io::stdin().is_terminal() {
        return Ok(rpassword::prompt_password(format!("{label}: "))?);
    }

    read_secret(&mut io::stdin().lock(), &mut io::stdout(), label)
}

fn read_secret(
    reader: &mut impl BufRead,
    writer: &mut impl Write,
    label: &str,
) -> Result<String> {
    Ok(rpassword::prompt_password_from_bufread(
        reader,
        writer,
        format!("{label}: "),
    )?)
}
