use std::env;
use std::io::{self, Write};
use tvdb::{CharCodeEmbedder, ScopedTimer, TextStore};

pub enum Command {
    Add { id: String, text: String },
    Search { text: String, k_top: usize },
    Get { id: String },
    List,
    Count,
    Delete { id: String },
    Clear,
    Save { path: String },
    Load { path: String },
}

/// Parse a command from a provided argument vector
/// This is used both for command-line args and REPL input
pub fn parse_command_from_args(args: &[String]) -> Result<Command, String> {
    if args.len() < 2 {
        return Err("No command provided. Use: add, search, get, list, count, delete, clear, save, load".to_string());
    }

    let command = &args[1];

    match command.as_str() {
        "add" => parse_add(&args),
        "search" => parse_search(&args),
        "get" => parse_get(&args),
        "list" => parse_list(&args),
        "count" => parse_count(&args),
        "delete" => parse_delete(&args),
        "clear" => parse_clear(&args),
        "save" => parse_save(&args),
        "load" => parse_load(&args),
        _ => Err(format!("Unknown command: {}. Available: add, search, get, list, count, delete, clear, save, load", command)),
    }
}

/// Parse the 'add' command
/// Usage: tvdb add <id> <text...>
fn parse_add(args: &[String]) -> Result<Command, String> {
    // args[0] = program name
    // args[1] = "add"
    // args[2] = id (required)
    // args[3..] = text words (required, at least 1)
    if args.len() < 4 {
        return Err("'add' command requires an ID and a text. Usage: tvdb add <id> <text...>".to_string());
    }

    let id = args[2].clone();
    let text = args[3..].join(" ");

    Ok(Command::Add { id, text })
}

/// Parse the 'search' command
/// Usage: tvdb search <text...> [--k_top <number>]
fn parse_search(args: &[String]) -> Result<Command, String> {
    // args[0] = program name
    // args[1] = "search"
    // args[2..] = query words and optional --k_top flag

    if args.len() < 3 {
        return Err("'search' command requires a query text. Usage: tvdb search <text...> [--k_top <number>]".to_string());
    }

    let mut k_top = 5; // default value
    let mut text_end = args.len();

    // Check if last two args are --k_top and a number
    if args.len() >= 4 && args[args.len() - 2] == "--k_top" {
        // Try to parse the last argument as k_top
        match args[args.len() - 1].parse::<usize>() {
            Ok(k) => {
                k_top = k;
                text_end = args.len() - 2; // Exclude --k_top and the number
            }
            Err(_) => {
                return Err(format!("Invalid --k_top value: '{}'. Must be a positive integer.", args[args.len() - 1]));
            }
        }
    }

    let text = args[2..text_end].join(" ");
    if text.is_empty() {
        return Err("Search text cannot be empty".to_string());
    }

    Ok(Command::Search { text, k_top })
}

/// Parse the 'get' command
/// Usage: tvdb get <id>
fn parse_get(args: &[String]) -> Result<Command, String> {
    // args[0] = program name
    // args[1] = "get"
    // args[2] = id (required)

    if args.len() < 3 {
        return Err("'get' command requires an ID. Usage: tvdb get <id>".to_string());
    }

    let id = args[2].clone();

    Ok(Command::Get { id })
}

/// Parse the 'list' command
/// Usage: tvdb list
fn parse_list(args: &[String]) -> Result<Command, String> {
    // List takes no arguments
    if args.len() > 2 {
        eprintln!("Warning: 'list' command takes no arguments, ignoring extras");
    }

    Ok(Command::List)
}

/// Parse the 'count' command
/// Usage: tvdb count
fn parse_count(args: &[String]) -> Result<Command, String> {
    // Count takes no arguments
    if args.len() > 2 {
        eprintln!("Warning: 'count' command takes no arguments, ignoring extras");
    }

    Ok(Command::Count)
}

/// Parse the 'delete' command
/// Usage: tvdb delete <id>
fn parse_delete(args: &[String]) -> Result<Command, String> {
    // args[0] = program name
    // args[1] = "delete"
    // args[2] = id (required)
    if args.len() < 3 {
        return Err("'delete' command requires an ID. Usage: tvdb delete <id>".to_string());
    }
    let id = args[2].clone();
    Ok(Command::Delete { id })
}

/// Parse the 'clear' command
/// Usage: tvdb clear
fn parse_clear(args: &[String]) -> Result<Command, String> {
    // Clear takes no arguments
    if args.len() > 2 {
        eprintln!("Warning: 'clear' command takes no arguments, ignoring extras");
    }

    Ok(Command::Clear)
}

/// Parse the 'save' command
/// Usage: tvdb save <path>
fn parse_save(args: &[String]) -> Result<Command, String> {
    if args.len() < 3 {
        return Err("'save' command requires a file path. Usage: save <path>".to_string());
    }
    let path = args[2].clone();
    Ok(Command::Save { path })
}

/// Parse the 'load' command
/// Usage: tvdb load <path>
fn parse_load(args: &[String]) -> Result<Command, String> {
    if args.len() < 3 {
        return Err("'load' command requires a file path. Usage: load <path>".to_string());
    }
    let path = args[2].clone();
    Ok(Command::Load { path })
}

/// REPL mode - interactive session with persistent store
pub fn run_repl(store: &mut TextStore) {
    println!("TVDB - Deterministic Text Vector Store");
    println!("Type 'help' for commands, 'exit' or 'quit' to quit\n");

    loop {
        print!("tvdb> ");
        io::stdout().flush().unwrap();

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
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

        let mut args: Vec<String> = vec!["tvdb".to_string()];
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

/// Single-command mode - load store from path, execute command, save back
/// Usage: tvdb <store_path> <command> [args...]
pub fn run_single_command(store: &mut TextStore) {
    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: tvdb <store_path> <command> [args...]");
        std::process::exit(1);
    }

    let store_path = &args[1];

    // Load existing store if the file is there
    if std::path::Path::new(store_path).exists() {
        match TextStore::load(store_path, Box::new(CharCodeEmbedder)) {
            Ok(loaded) => *store = loaded,
            Err(e) => {
                eprintln!("Error loading '{}': {}", store_path, e);
                std::process::exit(1);
            }
        }
    }

    // Rebuild args: shift so args[1] becomes the command
    let shifted_args: Vec<String> = std::iter::once(args[0].clone())
        .chain(args[2..].iter().cloned())
        .collect();

    let command = match parse_command_from_args(&shifted_args) {
        Ok(cmd) => cmd,
        Err(error) => {
            eprintln!("Error: {}", error);
            std::process::exit(1);
        }
    };

    execute_command(store, command);

    // Save store back to path
    if let Err(e) = store.save(store_path) {
        eprintln!("Error saving '{}': {}", store_path, e);
        std::process::exit(1);
    }
}

fn execute_command(store: &mut TextStore, command: Command) {
    match command {
        Command::Get { id } => {
            match store.get(&id) {
                Some((text, vector)) => println!("'{}': \"{}\" {:?}", id, text, vector),
                None => eprintln!("Error: ID '{}' not found", id),
            }
        }

        Command::List => {
            let rows = store.list();
            if rows.is_empty() {
                println!("Store is empty");
            } else {
                println!("Stored texts:");
                for (id, text) in rows {
                    println!("  {}: \"{}\"", id, text);
                }
                println!("Total: {} texts", store.count());
            }
        }

        Command::Count => println!("{}", store.count()),

        Command::Add { id, text } => {
            match store.add_texts(&[id], &[text]) {
                Ok(written) => println!("Added {} text(s)", written),
                Err(error) => eprintln!("Error: {}", error),
            }
        }

        Command::Search { text, k_top } => {
            let _timer = ScopedTimer::new("search");
            match store.similarity_search(&text, k_top) {
                Ok(hits) => {
                    if hits.is_empty() {
                        println!("No results found");
                    } else {
                        println!("Top {} results:", hits.len());
                        for (rank, (id, text, score)) in hits.iter().enumerate() {
                            println!("{}. ID: {}, Score: {:.4}, Text: \"{}\"",
                                rank + 1, id, score, text);
                        }
                    }
                }
                Err(error) => eprintln!("Error: {}", error),
            }
        }

        Command::Delete { id } => {
            match store.delete(&id) {
                Ok(message) => println!("{}", message),
                Err(error) => eprintln!("Error: {}", error),
            }
        }

        Command::Clear => {
            let before = store.count();
            store.clear();
            println!("Cleared {} texts", before);
        }

        Command::Save { path } => {
            match store.save(&path) {
                Ok(()) => println!("Store saved to '{}'", path),
                Err(error) => eprintln!("Error: {}", error),
            }
        }

        Command::Load { path } => {
            match TextStore::load(&path, Box::new(CharCodeEmbedder)) {
                Ok(loaded_store) => {
                    let count = loaded_store.count();
                    *store = loaded_store;
                    println!("Store loaded from '{}' ({} texts)", path, count);
                }
                Err(error) => eprintln!("Error: {}", error),
            }
        }
    }
}

fn print_help() {
    println!("Available commands:");
    println!("  add <id> <text...>               - Embed and store a text");
    println!("  search <text...> [--k_top N]     - Search for similar texts (default k=5)");
    println!("  get <id>                         - Retrieve a text and its vector by ID");
    println!("  list                             - List all texts");
    println!("  count                            - Show text count");
    println!("  delete <id>                      - Delete a text");
    println!("  clear                            - Delete every text");
    println!("  save <path>                      - Save store to file");
    println!("  load <path>                      - Load store from file");
    println!("  help                             - Show this help");
    println!("  exit, quit                       - Exit the program");
}
