use clap::Parser;
use crypt3::Scheme;
use snafu::ResultExt;
use zeroize::Zeroizing;

/// Generate crypt(3)-style shadow password hashes.
#[derive(Parser)]
#[command(name = "mkpasswd")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Password to hash; prompts interactively when omitted
    #[arg(long)]
    password: Option<String>,

    /// Salt without the magic prefix; generated randomly when omitted
    #[arg(long)]
    salt: Option<String>,

    /// Hash scheme: sha512, sha256, md5 or apr1
    #[arg(long, default_value = "sha512")]
    hash: String,

    /// Iteration count for the SHA schemes (clamped to 1000..=999999999)
    #[arg(long)]
    rounds: Option<u32>,
}

type Result<T> = std::result::Result<T, snafu::Whatever>;

fn prompt_password_confirm() -> Result<Zeroizing<String>> {
    loop {
        let password = Zeroizing::new(
            rpassword::prompt_password("Password: ")
                .whatever_context("Can't prompt for password")?,
        );
        let confirm = Zeroizing::new(
            rpassword::prompt_password("Confirm:  ")
                .whatever_context("Can't prompt for confirmation")?,
        );

        if *password == *confirm {
            return Ok(password);
        }

        eprintln!("Password mismatch or error.  Please try again.");
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let scheme: Scheme = cli
        .hash
        .parse()
        .whatever_context("Unknown hash specified")?;

    let password = match cli.password {
        Some(password) => Zeroizing::new(password),
        None => prompt_password_confirm()?,
    };

    let result = match cli.salt {
        Some(salt) => crypt3::generate(&cli.hash, password.as_bytes(), &salt, cli.rounds)
            .whatever_context("Failed to generate shadow hash")?,
        None => crypt3::generate_with_random_salt(
            &cli.hash,
            password.as_bytes(),
            scheme.max_salt_len(),
            cli.rounds,
        )
        .whatever_context("Failed to generate shadow hash")?,
    };

    if result.salt_truncated {
        eprintln!(
            "Warning: specified salt greater than max length ({}).  Salt will be truncated.",
            scheme.max_salt_len()
        );
    }

    println!("{}", result.hash);
    Ok(())
}

#[snafu::report]
fn main() -> Result<()> {
    run()
}
