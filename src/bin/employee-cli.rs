use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use url::Url;

#[derive(Parser)]
#[command(name = "employee-cli")]
#[command(about = "Command line client for the employee facade", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8111")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every employee
    All,
    /// Show one employee
    Get { id: String },
    /// Find employees whose name contains the text
    Search { text: String },
    /// Print the highest salary
    HighestSalary,
    /// List the ten best paid employees
    Top10,
    /// Create an employee
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        salary: i32,
        #[arg(long)]
        age: i32,
        #[arg(long)]
        title: String,
    },
    /// Delete an employee by id
    Delete { id: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = Url::parse(&cli.url)?;

    let res = match cli.command {
        Commands::All => client.get(route(&base, &["all"])?).send().await?,
        Commands::Get { id } => client.get(route(&base, &[id.as_str()])?).send().await?,
        Commands::Search { text } => client.get(route(&base, &["name", text.as_str()])?).send().await?,
        Commands::HighestSalary => {
            client
                .get(route(&base, &["highest", "salary"])?)
                .send()
                .await?
        }
        Commands::Top10 => client.get(route(&base, &["highest", "top10"])?).send().await?,
        Commands::Create {
            name,
            salary,
            age,
            title,
        } => {
            client
                .post(route(&base, &["create"])?)
                .json(&json!({ "name": name, "salary": salary, "age": age, "title": title }))
                .send()
                .await?
        }
        Commands::Delete { id } => client.delete(route(&base, &["delete", id.as_str()])?).send().await?,
    };

    print_response(res).await
}

/// `{base}/v1/employee/{segments...}`, each segment percent-encoded.
fn route(base: &Url, segments: &[&str]) -> Result<Url, Box<dyn std::error::Error>> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| format!("'{base}' cannot be used as a facade URL"))?
        .pop_if_empty()
        .extend(["v1", "employee"])
        .extend(segments);
    Ok(url)
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    // Delete answers with plain text; everything else is JSON.
    let rendered = match serde_json::from_str::<Value>(&text) {
        Ok(json) => serde_json::to_string_pretty(&json)?,
        Err(_) => text,
    };

    if !status.is_success() {
        eprintln!("{rendered}");
        return Err(format!("facade returned status {status}").into());
    }
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("http://localhost:8111").unwrap()
    }

    #[test]
    fn test_route_joins_fixed_segments() {
        assert_eq!(
            route(&base(), &["highest", "top10"]).unwrap().as_str(),
            "http://localhost:8111/v1/employee/highest/top10"
        );
    }

    #[test]
    fn test_route_encodes_user_input() {
        assert_eq!(
            route(&base(), &["name", "a#b"]).unwrap().as_str(),
            "http://localhost:8111/v1/employee/name/a%23b"
        );
        assert_eq!(
            route(&base(), &["delete", "a/b"]).unwrap().as_str(),
            "http://localhost:8111/v1/employee/delete/a%2Fb"
        );
    }

    #[test]
    fn test_route_keeps_base_path() {
        let base = Url::parse("http://gateway/facade/").unwrap();
        assert_eq!(
            route(&base, &["all"]).unwrap().as_str(),
            "http://gateway/facade/v1/employee/all"
        );
    }

    #[test]
    fn test_route_rejects_opaque_base() {
        let base = Url::parse("mailto:hr@company.com").unwrap();
        assert!(route(&base, &["all"]).is_err());
    }
}
