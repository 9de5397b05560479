use std::io::{self, Write};

use clap::Parser;
use sqlx::postgres::PgPoolOptions;

use storefront_api::auth::passwords::PasswordService;

/// Provisioning tool for accounts that cannot come in through the public
/// registration endpoint — most importantly the first admin.
#[derive(Parser, Debug)]
#[command(name = "create_account", about = "Create a storefront account")]
struct Args {
    /// Email address for the account (case insensitive).
    #[arg(long)]
    email: String,

    /// Plaintext password to digest and store for this account.
    #[arg(long)]
    password: String,

    /// Role to assign (`user` or `admin`).
    #[arg(long, default_value = "user")]
    role: String,

    /// Opening balance.
    #[arg(long, default_value_t = 0)]
    balance: i64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let args = Args::parse();
    let email = args.email.trim().to_lowercase();

    if !email.contains('@') {
        writeln!(io::stderr(), "error: email must contain '@'")?;
        std::process::exit(1);
    }

    let role = match args.role.trim().to_lowercase().as_str() {
        "admin" => "admin",
        "user" => "user",
        other => {
            writeln!(
                io::stderr(),
                "error: unsupported role '{other}'. Use 'user' or 'admin'."
            )?;
            std::process::exit(1);
        }
    };

    let database_url = std::env::var("DATABASE_URL")?;
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    let existing =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM accounts WHERE email = $1")
            .bind(&email)
            .fetch_one(&pool)
            .await?;

    if existing > 0 {
        writeln!(
            io::stderr(),
            "error: an account with email '{email}' already exists."
        )?;
        std::process::exit(1);
    }

    let digest = PasswordService::new().digest(args.password.trim());

    let account_id: i32 = sqlx::query_scalar(
        "INSERT INTO accounts (email, password_digest, terms_accepted, role, balance) \
         VALUES ($1, $2, TRUE, $3, $4) RETURNING id",
    )
    .bind(&email)
    .bind(&digest)
    .bind(role)
    .bind(args.balance)
    .fetch_one(&pool)
    .await?;

    println!("Created {role} account '{email}' with id {account_id}");
    Ok(())
}
