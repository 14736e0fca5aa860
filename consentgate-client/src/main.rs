//! consentgate - command-line client for the consent portal

use chrono::Utc;
use clap::{Parser, Subcommand};
use consentgate_core::{
    HospitalSearch, ProviderSearch, RecordPointer, Role, Scope, ScopeFilter, SourceMode,
    Vocabulary,
};
use consentgate_store::{SelectionCache, TokenStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use consentgate_client::workflow::{
    AccountController, CatalogWorkflow, ConsentSource, ConsentWorkflow, GuardianWorkflow,
    RecordSource, RecordsWorkflow, SelectionWorkflow,
};
use consentgate_client::{ApiClient, ClientConfig, Result, Session};

#[derive(Parser)]
#[command(name = "consentgate")]
#[command(about = "Consent-gated clinical record portal client")]
struct Cli {
    /// YAML configuration file
    #[arg(long)]
    config: Option<String>,
    /// Overrides `api.base_url`
    #[arg(long)]
    base_url: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Login {
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long, default_value = "patient")]
        role: Role,
    },
    Register {
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long, default_value = "patient")]
        role: Role,
    },
    Logout,
    Whoami,
    /// List consent grants (own record without --patient)
    Consents {
        #[arg(long)]
        patient: Option<String>,
    },
    Grant {
        patient: String,
        grantee_email: String,
        #[arg(long, default_value = "all")]
        scope: ScopeFilter,
        /// RFC 3339 timestamp or YYYY-MM-DD
        #[arg(long)]
        expires: String,
    },
    Revoke {
        consent_id: String,
        #[arg(long)]
        patient: Option<String>,
    },
    Records {
        #[arg(long)]
        patient: Option<String>,
        #[arg(long, default_value = "all")]
        scope: ScopeFilter,
    },
    /// Every scope at once
    Snapshot {
        #[arg(long)]
        patient: Option<String>,
    },
    CreatePatient,
    SelfRegister {
        /// YYYY-MM-DD
        dob: String,
    },
    /// Create a record from the catalog
    Catalog {
        scope: Scope,
        category: String,
        item: String,
        /// Free-text source; the selected hospital is used when omitted
        #[arg(long)]
        source: Option<String>,
    },
    /// Link an existing FHIR resource to the own record
    Link {
        scope: Scope,
        resource_id: String,
        #[arg(long)]
        issuer: Option<String>,
    },
    Hospitals {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        state: Option<String>,
        #[arg(long)]
        zip: Option<String>,
        #[arg(long, default_value = "0")]
        skip: u32,
    },
    Providers {
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        organization: Option<String>,
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        state: Option<String>,
        #[arg(long)]
        taxonomy: Option<String>,
        #[arg(long, default_value = "0")]
        skip: u32,
    },
    /// Show the saved hospital and provider
    Selection,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = ClientConfig::load(cli.config.as_deref());
    let level = loaded
        .as_ref()
        .map(|c| c.log.level.clone())
        .unwrap_or_else(|_| "info".to_string());

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&level)),
        )
        .init();

    let mut config = loaded.unwrap_or_else(|e| {
        tracing::warn!("Failed to load config, using defaults: {}", e);
        ClientConfig::default()
    });
    if let Some(base_url) = &cli.base_url {
        config.api.base_url = base_url.clone();
    }

    let storage = config.open_storage().unwrap_or_else(|e| {
        tracing::error!("Failed to open client state: {}", e);
        std::process::exit(1);
    });
    let session = Session::new(TokenStore::new(storage.clone()));
    let api = ApiClient::new(&config, session).unwrap_or_else(|e| {
        tracing::error!("Failed to create API client: {}", e);
        std::process::exit(1);
    });
    let cache = SelectionCache::new(storage);

    tracing::debug!(base_url = %config.base_url(), "Client ready");

    if let Err(e) = run(cli.command, api, cache).await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(command: Commands, api: ApiClient, cache: SelectionCache) -> Result<()> {
    match command {
        Commands::Login {
            email,
            password,
            role,
        } => {
            let mut account = AccountController::new(api);
            account.login(&email, &password, role).await?;
            print_status(account.status().message());
        }
        Commands::Register {
            email,
            password,
            role,
        } => {
            let mut account = AccountController::new(api);
            account.register(&email, &password, role).await?;
            print_status(account.status().message());
        }
        Commands::Logout => {
            let mut account = AccountController::new(api);
            account.logout();
            print_status(account.status().message());
        }
        Commands::Whoami => {
            let mut account = AccountController::new(api);
            let profile = account.load_profile().await?;
            println!("{} ({}) id={}", profile.email, profile.role, profile.id);
        }
        Commands::Consents { patient } => {
            let mut consents = ConsentWorkflow::new(api, consent_source(patient));
            consents.load().await?;
            print_consents(&consents);
        }
        Commands::Grant {
            patient,
            grantee_email,
            scope,
            expires,
        } => {
            let mut consents = ConsentWorkflow::new(api, ConsentSource::Patient(patient));
            let grant = consents
                .grant(&grantee_email, scope, &expires, Utc::now())
                .await?;
            print_status(consents.status().message());
            println!("consent id: {}", grant.id);
            print_consents(&consents);
        }
        Commands::Revoke {
            consent_id,
            patient,
        } => {
            let mut consents = ConsentWorkflow::new(api, consent_source(patient));
            consents.revoke(&consent_id).await?;
            print_status(consents.status().message());
            print_consents(&consents);
        }
        Commands::Records { patient, scope } => {
            let mut records = RecordsWorkflow::new(api, record_source(patient));
            let page = records.fetch(scope).await?;
            print_records(scope.as_str(), &page.records);
        }
        Commands::Snapshot { patient } => {
            let mut records = RecordsWorkflow::new(api, record_source(patient));
            let snapshot = records.fetch_snapshot().await?;
            for scope in Scope::ALL {
                print_records(scope.label(), snapshot.get(scope));
            }
        }
        Commands::CreatePatient => {
            let mut guardian = GuardianWorkflow::new(api);
            guardian.create_patient().await?;
            print_status(guardian.status().message());
        }
        Commands::SelfRegister { dob } => {
            let mut account = AccountController::new(api);
            account
                .register_patient_record(&dob, Utc::now().date_naive())
                .await?;
            print_status(account.status().message());
        }
        Commands::Catalog {
            scope,
            category,
            item,
            source,
        } => {
            let mut catalog = CatalogWorkflow::new(api.clone(), Vocabulary::STANDARD, scope);
            match source {
                Some(text) => {
                    catalog.wizard_mut().set_source_mode(SourceMode::Other);
                    catalog.wizard_mut().set_other_source(&text);
                }
                None => {
                    let mut selection = SelectionWorkflow::new(api, cache);
                    let hospital = selection.load_hospital().await?;
                    catalog.use_hospital(hospital.as_ref().map(|h| &h.value));
                }
            }
            catalog.wizard_mut().set_category(&category)?;
            catalog.wizard_mut().set_item(&item)?;
            catalog.submit().await?;
            print_status(catalog.status().message());
        }
        Commands::Link {
            scope,
            resource_id,
            issuer,
        } => {
            let mut catalog = CatalogWorkflow::new(api, Vocabulary::STANDARD, scope);
            catalog
                .link_existing(scope, &resource_id, issuer.as_deref())
                .await?;
            print_status(catalog.status().message());
        }
        Commands::Hospitals {
            name,
            city,
            state,
            zip,
            skip,
        } => {
            let mut selection = SelectionWorkflow::new(api, cache);
            let search = HospitalSearch {
                name,
                city,
                state,
                zip,
                skip,
                ..HospitalSearch::default()
            };
            let page = selection.search_hospitals(search).await?;
            for h in &page.results {
                println!(
                    "{}  {}  {}, {}",
                    h.ccn,
                    h.name,
                    h.city.as_deref().unwrap_or("-"),
                    h.state.as_deref().unwrap_or("-")
                );
            }
            print_status(selection.status().message());
        }
        Commands::Providers {
            first_name,
            last_name,
            organization,
            city,
            state,
            taxonomy,
            skip,
        } => {
            let mut selection = SelectionWorkflow::new(api, cache);
            let search = ProviderSearch {
                first_name,
                last_name,
                organization,
                city,
                state,
                taxonomy,
                skip,
                ..ProviderSearch::default()
            };
            let page = selection.search_providers(search).await?;
            for p in &page.results {
                println!(
                    "{}  {}  {}",
                    p.npi,
                    p.name,
                    p.taxonomy_desc.as_deref().unwrap_or("-")
                );
            }
            print_status(selection.status().message());
        }
        Commands::Selection => {
            let mut selection = SelectionWorkflow::new(api, cache);
            match selection.load_hospital().await? {
                Some(h) => println!("hospital: {} ({:?})", h.value.name, h.origin),
                None => println!("hospital: none"),
            }
            match selection.load_provider().await? {
                Some(p) => println!("provider: {} ({:?})", p.value.name, p.origin),
                None => println!("provider: none"),
            }
        }
    }
    Ok(())
}

fn consent_source(patient: Option<String>) -> ConsentSource {
    patient.map_or(ConsentSource::Mine, ConsentSource::Patient)
}

fn record_source(patient: Option<String>) -> RecordSource {
    patient.map_or(RecordSource::Mine, RecordSource::Patient)
}

fn print_status(message: Option<&str>) {
    if let Some(message) = message {
        println!("{}", message);
    }
}

fn print_consents(consents: &ConsentWorkflow) {
    let rows = consents.rows(Utc::now());
    if rows.is_empty() {
        println!("No consents");
        return;
    }
    for row in rows {
        println!(
            "{}  {}  {}  expires {}  {}",
            row.id,
            row.grantee_email,
            row.scope,
            row.expires_at.format("%Y-%m-%d"),
            row.status
        );
    }
}

fn print_records(heading: &str, records: &[RecordPointer]) {
    println!("{} ({})", heading, records.len());
    for record in records {
        println!("  {}  {}  [{}]", record.id, record.resource.summary(), record.issuer);
    }
}
