use crate::cert::{Certificate, CertificateColumn, CertificateFilters, SharePlatform};
use crate::cli::args::{Cli, Commands};
use crate::cli::completions::handle_completion_command;
use crate::service::CertificateClient;
use crate::store::{CertificateStore, FileSaver};
use crate::utils::config::RelcertConfig;
use crate::utils::errors::Result;
use crate::utils::output::{build_table_data, OutputFormat};
use crate::utils::paths::RelcertPaths;
use std::io;

type CliStore = CertificateStore<CertificateClient, FileSaver>;

pub async fn handle_command(cli: Cli) -> Result<()> {
    // Initialize logging - always to stderr
    if !cli.quiet {
        let log_level = match cli.verbose {
            0 => "relcert=warn",  // Default: warnings only
            1 => "relcert=info",  // -v: info level
            2 => "relcert=debug", // -vv: debug level
            _ => "relcert=trace", // -vvv+: trace level
        };

        tracing_subscriber::fmt()
            .with_writer(io::stderr)
            .with_env_filter(log_level)
            .init();
    }

    let output = OutputFormat::new(cli.raw);
    let load_config = || {
        RelcertConfig::load_from(cli.config.as_deref())
            .map(|c| c.with_overrides(cli.api_url.clone(), cli.token.clone()))
    };

    match cli.command {
        Commands::Completion { shell } => handle_completion_command(shell),
        Commands::Show { ref id } => {
            let store = build_store(&load_config()?, None)?;
            show_certificate(&store, id, &output).await
        }
        Commands::List {
            ref relationship,
            ref filter,
            ref columns,
        } => {
            let store = build_store(&load_config()?, None)?;
            let columns = CertificateColumn::parse_list(columns.as_deref())?;
            match relationship {
                Some(relationship_id) => {
                    store.get_certificates(relationship_id).await?;
                }
                None => {
                    let filters = CertificateFilters::parse_args(filter)?;
                    store.fetch_all_certificates(&filters).await?;
                }
            }
            print_certificates(&store.certificates(), &columns, &output);
            Ok(())
        }
        Commands::Download {
            ref id,
            output: ref dir,
        } => {
            let store = build_store(&load_config()?, dir.as_deref())?;
            RelcertPaths::ensure_dir_exists(store.sink().dir())?;
            store.download_certificate(id).await?;
            if !cli.quiet {
                eprintln!(
                    "Saved certificate to {}",
                    store.sink().target_path(id).display()
                );
            }
            Ok(())
        }
        Commands::Share {
            ref id,
            ref platform,
        } => {
            let store = build_store(&load_config()?, None)?;
            let platform = SharePlatform::parse(platform);
            let share_url = store.share_certificate(id, &platform).await?;

            println!("{share_url}");
            if let Some(intent) = platform.intent_url(&share_url) {
                if !cli.quiet {
                    eprintln!("Share on {platform}:");
                }
                println!("{intent}");
            }
            Ok(())
        }
    }
}

fn build_store(config: &RelcertConfig, download_dir: Option<&str>) -> Result<CliStore> {
    let client = CertificateClient::from_config(config)?;
    tracing::debug!("Using certificate service at {}", client.base_url());

    let dir = download_dir
        .map(RelcertPaths::expand_home)
        .unwrap_or_else(|| config.download_dir());

    Ok(CertificateStore::new(client, FileSaver::new(dir)))
}

async fn show_certificate(store: &CliStore, id: &str, output: &OutputFormat) -> Result<()> {
    store.get_certificate(id).await?;

    if let Some(certificate) = store.certificate() {
        output.print_key_value(&certificate_details(&certificate));
    }
    Ok(())
}

fn certificate_details(cert: &Certificate) -> Vec<(String, String)> {
    let mut pairs = vec![
        ("ID".to_string(), cert.id.clone()),
        ("Number".to_string(), cert.metadata.certificate_number.clone()),
        ("Title".to_string(), cert.title.clone()),
        ("Type".to_string(), cert.kind.to_string()),
        ("Level".to_string(), cert.level.to_string()),
        ("Issued By".to_string(), cert.metadata.issued_by.clone()),
    ];

    if !cert.description.is_empty() {
        pairs.push(("Description".to_string(), cert.description.clone()));
    }

    for recipient in &cert.recipients {
        pairs.push((
            "Recipient".to_string(),
            format!(
                "{} (awarded {})",
                recipient.user.full_name(),
                recipient.awarded_at.format("%Y-%m-%d")
            ),
        ));
    }

    if let Some(related) = cert.related_id.as_ref().and_then(|r| r.id()) {
        pairs.push((
            "Related To".to_string(),
            format!("{} {related}", cert.related_to.as_str()),
        ));
    }

    if let Some(valid_until) = cert.metadata.valid_until {
        let status = if cert.is_expired() { " (expired)" } else { "" };
        pairs.push((
            "Valid Until".to_string(),
            format!("{}{status}", valid_until.format("%Y-%m-%d")),
        ));
    }

    if let Some(criteria) = &cert.criteria {
        pairs.push(("Criteria".to_string(), criteria.description.clone()));
        for requirement in &criteria.requirements {
            pairs.push(("Requirement".to_string(), requirement.clone()));
        }
        if let Some(days) = criteria.time_required {
            pairs.push(("Days Required".to_string(), days.to_string()));
        }
        if let Some(points) = criteria.points_required {
            pairs.push(("Points Required".to_string(), points.to_string()));
        }
    }

    pairs.push((
        "Stats".to_string(),
        format!(
            "{} views, {} downloads, {} shares",
            cert.stats.view_count, cert.stats.download_count, cert.stats.share_count
        ),
    ));
    pairs
}

fn print_certificates(
    certificates: &[Certificate],
    columns: &[CertificateColumn],
    output: &OutputFormat,
) {
    if certificates.is_empty() {
        return;
    }

    let headers: Vec<&str> = columns.iter().map(CertificateColumn::header).collect();
    let rows = build_table_data(certificates, columns);
    output.print_table(&headers, &rows);
}
