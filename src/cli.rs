use std::io::{self, Write};
use cartiq::{Product, Store};
use cartiq::recommender::{RECOMMENDATION_COUNT, rank};

#[derive(Debug, PartialEq)]
pub enum Command {
    List,
    Show { id: u64, user: Option<String> },
    Recommend { id: u64 },
    Login { username: String },
    Users,
    Home { username: String },
    History { username: String },
}

const AVAILABLE: &str = "list, show, recommend, login, users, home, history";

/// Parse a command from a provided argument vector
/// This is used both for command-line args and REPL input
pub fn parse_command_from_args(args: &[String]) -> Result<Command, String> {
    if args.len() < 2 {
        return Err(format!("No command provided. Use: {}", AVAILABLE));
    }

    let command = &args[1];

    match command.as_str() {
        "list" => parse_list(args),
        "show" => parse_show(args),
        "recommend" => parse_recommend(args),
        "login" => parse_login(args),
        "users" => Ok(Command::Users),
        "home" => parse_named(args, "home").map(|username| Command::Home { username }),
        "history" => parse_named(args, "history").map(|username| Command::History { username }),
        _ => Err(format!("Unknown command: {}. Available: {}", command, AVAILABLE)),
    }
}

fn parse_id(raw: &str) -> Result<u64, String> {
    raw.parse::<u64>()
        .map_err(|_| format!("Invalid product id: '{}'. Must be a non-negative integer.", raw))
}

/// Parse the 'list' command
/// Usage: cartiq list
fn parse_list(args: &[String]) -> Result<Command, String> {
    if args.len() > 2 {
        eprintln!("Warning: 'list' command takes no arguments, ignoring extras");
    }

    Ok(Command::List)
}

/// Parse the 'show' command
/// Usage: cartiq show <id> [--user <name>]
fn parse_show(args: &[String]) -> Result<Command, String> {
    // args[0] = program name
    // args[1] = "show"
    // args[2] = id (required)
    // args[3..] = optional --user flag
    if args.len() < 3 {
        return Err("'show' command requires a product ID. Usage: cartiq show <id> [--user <name>]".to_string());
    }

    let id = parse_id(&args[2])?;

    let user = match &args[3..] {
        [] => None,
        [flag, name] if flag == "--user" => Some(name.clone()),
        _ => return Err("Usage: cartiq show <id> [--user <name>]".to_string()),
    };

    Ok(Command::Show { id, user })
}

/// Parse the 'recommend' command
/// Usage: cartiq recommend <id>
fn parse_recommend(args: &[String]) -> Result<Command, String> {
    if args.len() < 3 {
        return Err("'recommend' command requires a product ID. Usage: cartiq recommend <id>".to_string());
    }

    Ok(Command::Recommend { id: parse_id(&args[2])? })
}

/// Parse the 'login' command
/// Usage: cartiq login <name>
fn parse_login(args: &[String]) -> Result<Command, String> {
    parse_named(args, "login").map(|username| Command::Login { username })
}

/// Commands whose only argument is a username
fn parse_named(args: &[String], command: &str) -> Result<String, String> {
    if args.len() < 3 {
        return Err(format!("'{0}' command requires a username. Usage: cartiq {0} <name>", command));
    }

    Ok(args[2].clone())
}

/// REPL mode - interactive session over the data directory
pub fn run_repl(store: &Store) {
    println!("CartIQ - Storefront");
    println!("Data directory: {}", store.dir().display());
    println!("Type 'help' for commands, 'exit' or 'quit' to quit\n");

    loop {
        print!("cartiq> ");
        if let Err(error) = io::stdout().flush() {
            eprintln!("Error writing prompt: {}", error);
        }

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) => break,
            Ok(_) => {}
            Err(error) => {
                eprintln!("Error reading input: {}", error);
                continue;
            }
        }

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        if input == "exit" || input == "quit" {
            println!("Goodbye!");
            break;
        }

        if input == "help" {
            print_help();
            continue;
        }

        let mut args: Vec<String> = vec!["cartiq".to_string()];
        args.extend(input.split_whitespace().map(|s| s.to_string()));

        let command = match parse_command_from_args(&args) {
            Ok(cmd) => cmd,
            Err(error) => {
                eprintln!("Error: {}", error);
                continue;
            }
        };

        execute_command(store, command);
    }
}

/// Single-command mode - run one command against the data directory
/// Usage: cartiq <command> [args...]
pub fn run_single_command(store: &Store, args: &[String]) {
    let command = match parse_command_from_args(args) {
        Ok(cmd) => cmd,
        Err(error) => {
            eprintln!("Error: {}", error);
            std::process::exit(1);
        }
    };

    if !execute_command(store, command) {
        std::process::exit(1);
    }
}

fn print_products(products: &[Product]) {
    for p in products {
        println!("  {}: {} (price: {}, ram: {}, storage: {}, rating: {})",
            p.id, p.label(),
            fmt_feature(p.price), fmt_feature(p.ram),
            fmt_feature(p.storage), fmt_feature(p.rating));
    }
}

fn fmt_feature(value: Option<f64>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "-".to_string(),
    }
}

/// Returns false when the command failed
fn execute_command(store: &Store, command: Command) -> bool {
    let outcome = match command {
        Command::List => store.catalog().map(|products| {
            if products.is_empty() {
                println!("Catalog is empty");
            } else {
                println!("Products:");
                print_products(&products);
                println!("Total: {} products", products.len());
            }
        }),

        Command::Show { id, user } => store.view_product(user.as_deref(), id).map(|view| {
            println!("Product:");
            print_products(std::slice::from_ref(&view.product));
            println!("You may also like:");
            print_products(&view.recommendations);
        }),

        Command::Recommend { id } => store.catalog()
            .and_then(|catalog| {
                let ranked = rank(&catalog, id, RECOMMENDATION_COUNT)?;
                Ok((catalog, ranked))
            })
            .map(|(catalog, ranked)| {
                if ranked.is_empty() {
                    println!("No recommendations");
                } else {
                    println!("Top {} recommendations:", ranked.len());
                    for (pos, (i, score)) in ranked.iter().enumerate() {
                        println!("{}. ID: {}, Name: {}, Score: {:.6}",
                            pos + 1, catalog[*i].id, catalog[*i].label(), score);
                    }
                }
            }),

        Command::Login { username } => store.register_user(&username).map(|created| {
            if created {
                println!("Registered user '{}'", username.trim());
            } else {
                println!("Welcome back, '{}'", username.trim());
            }
        }),

        Command::Users => store.users().map(|users| {
            if users.is_empty() {
                println!("No users");
            } else {
                for user in users {
                    println!("  {}", user);
                }
            }
        }),

        Command::Home { username } => store.recommendations_for(&username).map(|recs| {
            if recs.is_empty() {
                println!("No recommendations for '{}' yet", username);
            } else {
                println!("Recommended for '{}':", username);
                print_products(&recs);
            }
        }),

        Command::History { username } => store.activity_for(&username).map(|activity| {
            if activity.is_empty() {
                println!("No activity for '{}'", username);
            } else {
                for entry in activity {
                    println!("  {} product {}", entry.action, entry.product_id);
                }
            }
        }),
    };

    match outcome {
        Ok(()) => true,
        Err(error) => {
            eprintln!("Error: {}", error);
            false
        }
    }
}

fn print_help() {
    println!("Available commands:");
    println!("  list                      - List all products");
    println!("  show <id> [--user <name>] - Show a product and similar ones, logging the view");
    println!("  recommend <id>            - Scored recommendations for a product");
    println!("  login <name>              - Register a user");
    println!("  users                     - List registered users");
    println!("  home <name>               - Recommendations from the user's last view");
    println!("  history <name>            - A user's activity");
    println!("  help                      - Show this help");
    println!("  exit, quit                - Exit the program");
}
