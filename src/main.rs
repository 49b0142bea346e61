use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use route_node::config::{load_config, ConfigWatcher, ObservabilityConfig, RouteNodeConfig};
use route_node::observability::{init_logging, metrics};
use route_node::routing::{transition_path, RouteTableHandle};
use route_node::{ComponentId, NodeName, RouteConfigNode, RouteDescriptor, RouteNode, RouteStore, RouterStore};

#[derive(Parser)]
#[command(name = "route-node")]
#[command(about = "Inspect route trees, resolutions and route node re-renders", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load and validate a configuration, then print its route tree
    Check { config: PathBuf },
    /// Print the component a node renders for a route
    Resolve {
        config: PathBuf,
        #[arg(short, long)]
        route: String,
        #[arg(short, long, default_value = "")]
        node: String,
    },
    /// Print the transition path between two routes
    Transition { from: String, to: String },
    /// Navigate through routes and report which nodes re-render
    Simulate {
        config: PathBuf,
        #[arg(short, long = "node")]
        nodes: Vec<String>,
        routes: Vec<String>,
    },
    /// Re-resolve a route every time the configuration file changes
    Watch {
        config: PathBuf,
        #[arg(short, long)]
        route: String,
        #[arg(short, long, default_value = "")]
        node: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { config } => {
            let config = load(&config)?;
            println!("configuration OK: {} top-level routes", config.routes.len());
            print_tree(&config.routes, 0);
        }
        Commands::Resolve { config, route, node } => {
            let config = load(&config)?;
            let table = config.build_table();
            let component = table.resolve(route.as_str(), &NodeName::from(node))?;
            println!("{}", component);
        }
        Commands::Transition { from, to } => {
            init_logging(&ObservabilityConfig::default());
            let path = transition_path(&RouteDescriptor::new(to), Some(&RouteDescriptor::new(from)));
            println!("{}", serde_json::to_string_pretty(&path)?);
        }
        Commands::Simulate { config, nodes, routes } => {
            let config = load(&config)?;
            simulate(&config, nodes, routes)?;
        }
        Commands::Watch { config: path, route, node } => {
            let config = load(&path)?;
            watch(&path, config, route, NodeName::from(node)).await?;
        }
    }

    Ok(())
}

fn load(path: &Path) -> Result<RouteNodeConfig, Box<dyn std::error::Error>> {
    let config = load_config(path)?;
    init_logging(&config.observability);
    metrics::set_enabled(config.observability.metrics_enabled);
    tracing::info!(path = ?path, routes = config.routes.len(), "Configuration loaded");
    Ok(config)
}

fn print_tree(nodes: &[RouteConfigNode<ComponentId>], depth: usize) {
    for node in nodes {
        let component = node.component.as_ref().map_or("-", |c| c.as_str());
        println!("{}{} ({})", "  ".repeat(depth), node.name, component);
        print_tree(&node.children, depth + 1);
    }
}

fn simulate(
    config: &RouteNodeConfig,
    nodes: Vec<String>,
    routes: Vec<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let table = Arc::new(config.build_table());
    let store = Arc::new(RouterStore::new());

    let mut mounted = Vec::with_capacity(nodes.len());
    for name in nodes {
        let node_name = NodeName::from(name);
        let render_table = table.clone();
        let render_name = node_name.clone();
        let node = RouteNode::mount(
            node_name,
            Some(store.clone() as Arc<dyn RouteStore>),
            move |transition| {
                let rendered = match render_table.resolve(&*transition.route, &render_name) {
                    Ok(component) => component.to_string(),
                    Err(e) => format!("error: {}", e),
                };
                println!("  node '{}' re-renders → {}", render_name, rendered);
            },
        )?;
        mounted.push(node);
    }

    for route in routes {
        println!("navigate → {}", route);
        if !store.navigate_to(route.as_str()) {
            println!("  already active");
        }
        println!("  intersection node: '{}'", store.intersection_node());
    }

    for node in &mounted {
        println!("node '{}': {} re-renders", node.node_name(), node.render_count());
    }
    Ok(())
}

async fn watch(
    path: &Path,
    config: RouteNodeConfig,
    route: String,
    node: NodeName,
) -> Result<(), Box<dyn std::error::Error>> {
    let handle = RouteTableHandle::new(config.build_table());
    print_resolution(&handle, &route, &node);

    let (watcher, mut updates) = ConfigWatcher::new(path);
    let _watcher = watcher.run()?;

    loop {
        tokio::select! {
            update = updates.recv() => {
                let Some(config) = update else { break };
                handle.replace(config.build_table());
                print_resolution(&handle, &route, &node);
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted, stopping watcher");
                break;
            }
        }
    }
    Ok(())
}

fn print_resolution(handle: &RouteTableHandle<ComponentId>, route: &str, node: &NodeName) {
    let table = handle.load();
    match table.resolve(route, node) {
        Ok(component) => println!("{} @ '{}' → {}", route, node, component),
        Err(e) => println!("{} @ '{}' → error: {}", route, node, e),
    }
}
