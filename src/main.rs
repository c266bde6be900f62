use clap::Parser;
use dishpick::cli::{
    dishes, handle_completions, handle_config_init, recommend, Cli, Commands, ConfigCommands,
};

#[tokio::main]
async fn main() {
    // Optional: the API key may live in a .env file next to the binary.
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve(args) => dishpick::cli::serve::run_serve(args).await,
        Commands::Recommend(args) => match recommend::handle_recommend(&args).await {
            Ok(output) => {
                println!("{}", output);
                Ok(())
            }
            Err(e) => Err(e),
        },
        Commands::Dishes(args) => match dishes::handle_dishes(&args) {
            Ok(output) => {
                println!("{}", output);
                Ok(())
            }
            Err(e) => Err(e),
        },
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::Init(args) => handle_config_init(&args),
        },
        Commands::Completions(args) => {
            handle_completions(&args);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
