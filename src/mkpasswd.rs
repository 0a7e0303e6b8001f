use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use rand::thread_rng;
use rpassword::prompt_password;

use shacrypt::crypt::{crypt, salt::make_salt};

/// Hash a password using SHA-crypt (or MD5-crypt), in the style of the
/// `mkpasswd` utility.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct MkpasswdArgs {
    /// Digest variant to use.
    #[arg(short = 'm', long = "method", value_enum, default_value = "sha512")]
    method: Method,

    /// Number of hashing rounds; clamped to [1000, 999999999].
    #[arg(short = 'R', long = "rounds")]
    rounds: Option<u32>,

    /// Salt to use; a random 16-character salt is generated if omitted.
    #[arg(short = 'S', long = "salt")]
    salt: Option<String>,

    /// Password to hash; prompted for interactively if omitted.
    password: Option<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Method {
    Sha256,
    Sha512,
}

impl Method {
    fn prefix(self) -> &'static str {
        match self {
            Method::Sha256 => "$5$",
            Method::Sha512 => "$6$",
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let args = MkpasswdArgs::parse();
    log::debug!("method={:?} rounds={:?}", args.method, args.rounds);

    let password = match args.password {
        Some(p) => p,
        None => match prompt_password("Password: ") {
            Ok(p) => p,
            Err(e) => {
                eprintln!("mkpasswd: {e}");
                return ExitCode::FAILURE;
            }
        },
    };

    let raw_salt = match args.salt {
        Some(s) => s.into_bytes(),
        None => make_salt(16, thread_rng()),
    };

    let mut salt = args.method.prefix().as_bytes().to_vec();
    if let Some(rounds) = args.rounds {
        salt.extend_from_slice(format!("rounds={rounds}$").as_bytes());
    }
    salt.extend_from_slice(&raw_salt);

    match crypt(password.as_bytes(), &salt) {
        Ok(hash) => {
            println!("{hash}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("mkpasswd: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn verify_cli() {
        use super::MkpasswdArgs;
        use clap::CommandFactory;
        MkpasswdArgs::command().debug_assert()
    }
}
