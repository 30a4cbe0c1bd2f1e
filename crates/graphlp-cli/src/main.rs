use clap::{ArgAction, Parser, Subcommand};
use graphlp_lang::{Outcome, SolveRequest};
use graphlp_solver::{Solution, Solver};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "graphlp")]
#[command(about = "Solve two-variable linear programs with the graphical method", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct ProblemArgs {
    /// JSON object of form fields (objective_type, objective_func, restriction_*)
    #[arg(long, conflicts_with_all = ["objective", "constraints"])]
    file: Option<PathBuf>,
    /// Objective function, e.g. "5*x1 + 4*x2"
    #[arg(short, long)]
    objective: Option<String>,
    /// MAX or MIN
    #[arg(short = 't', long = "type", default_value = "MAX")]
    objective_type: String,
    /// Constraint, e.g. "6*x1 + 4*x2 <= 24" (repeatable)
    #[arg(short = 'c', long = "constraint")]
    constraints: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a problem and print the optimal vertex
    Solve {
        #[command(flatten)]
        problem: ProblemArgs,
        /// Output format (json, pretty)
        #[arg(short, long, default_value = "pretty")]
        format: String,
        /// Comparison tolerance
        #[arg(long)]
        tolerance: Option<f64>,
        /// Decimal places used to merge intersection points
        #[arg(long)]
        precision: Option<u32>,
        /// Smallest half-width of the plotted area
        #[arg(long)]
        scale_floor: Option<f64>,
    },
    /// Parse a single constraint (or objective) and print its coefficients
    Parse {
        /// The text to parse
        text: String,
        /// Treat the text as an objective function
        #[arg(long)]
        objective: bool,
    },
    /// Check every field of a problem for errors
    Check {
        #[command(flatten)]
        problem: ProblemArgs,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        std::process::exit(1);
    }
}

fn load_request(args: &ProblemArgs) -> SolveRequest {
    if let Some(file) = &args.file {
        let source = match std::fs::read_to_string(file) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error reading file: {}", e);
                std::process::exit(1);
            }
        };
        let fields: serde_json::Map<String, serde_json::Value> = match serde_json::from_str(&source) {
            Ok(f) => f,
            Err(e) => {
                eprintln!("Error reading fields from {}: {}", file.display(), e);
                std::process::exit(1);
            }
        };
        return SolveRequest::from_fields(fields.into_iter().map(|(k, v)| {
            let text = match v {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            (k, text)
        }));
    }

    let mut request = SolveRequest::new(
        args.objective_type.clone(),
        args.objective.clone().unwrap_or_default(),
    );
    for c in args.constraints.iter().filter(|c| !c.trim().is_empty()) {
        request = request.with_constraint(c.clone());
    }
    request
}

fn build_solver(tolerance: Option<f64>, precision: Option<u32>, scale_floor: Option<f64>) -> Solver {
    let mut solver = Solver::new();
    if let Some(tol) = tolerance {
        solver = solver.with_tolerance(tol);
    }
    if let Some(decimals) = precision {
        solver = solver.with_precision(decimals);
    }
    if let Some(floor) = scale_floor {
        solver = solver.with_scale_floor(floor);
    }
    solver
}

fn print_solution(solution: &Solution) {
    println!("Status: OPTIMAL");
    println!(
        "Optimal point: x1 = {:.4}, x2 = {:.4}",
        solution.optimal_point.x1, solution.optimal_point.x2
    );
    println!("Optimal value: Z = {:.4}", solution.optimal_value);
    if solution.has_multiple_optima() {
        println!("Multiple optima: every marked vertex attains Z");
    }
    println!();
    println!("Vertices:");
    for v in &solution.vertices {
        let mark = if v.is_optimal { "*" } else { " " };
        println!("  {} {:4} ({:10.4}, {:10.4})  Z = {:.4}", mark, v.label, v.x1, v.x2, v.z);
    }
    if !solution.binding_constraints.is_empty() {
        println!();
        println!("Binding constraints:");
        for name in &solution.binding_constraints {
            println!("  - {}", name);
        }
    }
    println!();
    println!("Display scale: {:.2}", solution.chart.max_scale);
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Solve {
            problem,
            format,
            tolerance,
            precision,
            scale_floor,
        } => {
            let request = load_request(&problem);
            let solver = build_solver(tolerance, precision, scale_floor);

            let result = request.solve(&solver);
            if format == "json" {
                let outcome = Outcome::from(result);
                match serde_json::to_string_pretty(&outcome) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("Error serializing result: {}", e);
                        std::process::exit(1);
                    }
                }
                if outcome.is_error() {
                    std::process::exit(1);
                }
                return;
            }

            match result {
                Ok(solution) => print_solution(&solution),
                Err(error) => {
                    eprintln!("Error: {}", error);
                    std::process::exit(1);
                }
            }
        }
        Commands::Parse { text, objective } => {
            if objective {
                match graphlp_lang::Parser::parse_objective(&text) {
                    Ok(expr) => println!("c1 = {}, c2 = {}", expr.c1, expr.c2),
                    Err(e) => {
                        eprintln!("Parse error: {}", e);
                        std::process::exit(1);
                    }
                }
            } else {
                match graphlp_lang::Parser::parse_constraint(&text) {
                    Ok(c) => {
                        println!("c1 = {}, c2 = {}, sense = {}, b = {}", c.expr.c1, c.expr.c2, c.sense, c.rhs);
                        println!("canonical: {}", c.canonical());
                    }
                    Err(e) => {
                        eprintln!("Parse error: {}", e);
                        std::process::exit(1);
                    }
                }
            }
        }
        Commands::Check { problem } => {
            let request = load_request(&problem);
            let diagnostics = request.diagnostics();
            if diagnostics.is_empty() {
                println!("✓ problem is valid");
                println!("  objective: {} {}", request.objective_type, request.objective_func);
                println!("  {} constraints", request.constraints.len());
            } else {
                eprintln!("✗ problem has errors:");
                for d in &diagnostics {
                    eprintln!("  {}: {}", d.field, d.message);
                }
                std::process::exit(1);
            }
        }
    }
}
