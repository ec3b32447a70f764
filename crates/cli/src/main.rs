use clap::{Parser, Subcommand};
use drive_core::google::drive::GoogleDrive;
use drive_core::{
    core_config_from_env_values, DriveService, FolderPath, ObjectId, PathedObject, SearchFilter,
};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "drive")]
#[command(about = "Path-based access to a remote drive")]
struct Cli {
    /// OAuth access token
    #[arg(long, env = "DRIVE_ACCESS_TOKEN", hide_env_values = true)]
    access_token: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a folder path to its identifier
    Resolve {
        /// Slash-delimited folder path
        path: String,
    },
    /// List the children of a folder
    Navigate {
        /// Slash-delimited folder path (root when omitted)
        path: Option<String>,
        /// Only list children with this MIME type
        #[arg(long)]
        mime_type: Option<String>,
    },
    /// Search by name and/or MIME type
    Search {
        /// Substring of the name
        #[arg(long)]
        name: Option<String>,
        /// Exact MIME type
        #[arg(long)]
        mime_type: Option<String>,
    },
    /// Print the full path of an object
    PathOf {
        /// Object identifier
        id: String,
    },
    /// Delete an object
    Delete {
        /// Object identifier
        id: String,
    },
}

fn print_objects(objects: &[PathedObject]) {
    if objects.is_empty() {
        println!("No files found.");
        return;
    }
    for o in objects {
        println!("{}\t{}\t{}", o.kind().as_str(), o.object.id, o.path);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let cfg = core_config_from_env_values(
        std::env::var("DRIVE_ROOT_ID").ok(),
        std::env::var("DRIVE_AMBIGUITY_POLICY").ok(),
        std::env::var("DRIVE_MAX_PATH_DEPTH").ok(),
    )?;
    let store = GoogleDrive::new(drive_core::google::http_client()?, cli.access_token);
    let service = DriveService::new(Arc::new(cfg), Arc::new(store));

    match cli.command {
        Commands::Resolve { path } => {
            let folder = service.resolve_folder(&FolderPath::parse(&path)).await?;
            println!("{}\t{}", folder.id, folder.path);
        }
        Commands::Navigate { path, mime_type } => {
            let path = path.as_deref().map(FolderPath::parse).unwrap_or_default();
            let listing = service.navigate(&path, mime_type.as_deref()).await?;
            print_objects(&listing.children);
        }
        Commands::Search { name, mime_type } => {
            let results = service.search(&SearchFilter::new(name, mime_type)).await?;
            print_objects(&results);
        }
        Commands::PathOf { id } => {
            let path = service.path_of(&ObjectId::parse(&id)?).await?;
            if path.is_empty() {
                println!("/");
            } else {
                println!("{path}");
            }
        }
        Commands::Delete { id } => {
            service.delete(&ObjectId::parse(&id)?).await?;
            println!("Deleted {id}");
        }
    }

    Ok(())
}
