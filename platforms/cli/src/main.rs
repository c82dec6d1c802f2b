use clap::Parser;
use std::io::Read;
use std::path::Path;
use std::process::ExitCode;
use std::thread;
use std::time::Duration;
use tapeline::catalog;
use tapeline::{HaltStates, Machine, RulesLoader, Step, Verdict};

const DEFAULT_MAX_STEPS: usize = 10_000;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// The transition rules file to execute (rules are read from stdin when piped)
    #[clap(short, long)]
    rules: Option<String>,

    /// Run a built-in demo by name instead of a rules file
    #[clap(long, conflicts_with = "rules")]
    demo: Option<String>,

    /// List the built-in demos and exit
    #[clap(long)]
    list_demos: bool,

    /// Initial tape content (empty means a single blank cell)
    #[clap(short, long, default_value = "")]
    tape: String,

    /// Start state
    #[clap(short, long, default_value = "q0")]
    state: String,

    /// Halting state labels, comma separated; a label containing "accept" accepts
    #[clap(short = 'H', long = "halt", value_delimiter = ',')]
    halt: Vec<String>,

    /// Print each step of the execution
    #[clap(short = 'd', long)]
    debug: bool,

    /// Milliseconds to wait between steps
    #[clap(long)]
    delay_ms: Option<u64>,

    /// Maximum number of steps before giving up
    #[clap(long, default_value_t = DEFAULT_MAX_STEPS)]
    max_steps: usize,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.list_demos {
        for demo in &catalog::DEMOS {
            println!("{:<20} {}", demo.name, demo.description);
        }
        return ExitCode::SUCCESS;
    }

    let mut machine = match build_machine(&cli) {
        Ok(machine) => machine,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::FAILURE;
        }
    };

    run(&mut machine, &cli);

    println!("{}", machine.tape_string());
    println!(
        "State: {}, Status: {}, Steps: {}",
        machine.state(),
        machine.status(),
        machine.step_count()
    );

    ExitCode::SUCCESS
}

fn build_machine(cli: &Cli) -> Result<Machine, String> {
    if let Some(name) = &cli.demo {
        let demo = catalog::find(name)
            .ok_or_else(|| format!("Unknown demo '{name}'. Try --list-demos."))?;
        return demo.machine().map_err(|e| e.to_string());
    }

    let table = match &cli.rules {
        Some(path) => RulesLoader::load_table(Path::new(path)),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .map_err(|e| format!("Failed to read rules from stdin: {e}"))?;
            RulesLoader::load_table_from_string(&content)
        }
        None => {
            return Err(
                "No rules given: pass --rules FILE, --demo NAME, or pipe rule text on stdin."
                    .to_string(),
            )
        }
    }
    .map_err(|e| e.to_string())?;

    let halt_states = HaltStates::infer(cli.halt.iter().cloned());
    Ok(Machine::new(table, halt_states, &cli.tape, &cli.state))
}

/// The scheduling loop: one step per tick at the chosen cadence, cancelled by
/// a terminal status, the no-op signal, or the step ceiling.
fn run(machine: &mut Machine, cli: &Cli) {
    let print_state = |machine: &Machine| {
        println!(
            "Step: {}, State: {}, Tape: {}, Head: {}",
            machine.step_count(),
            machine.state(),
            machine.tape_string(),
            machine.head()
        );
    };

    if cli.debug {
        print_state(machine);
    }

    while machine.step_count() < cli.max_steps {
        match machine.step() {
            Step::Continue => {
                if cli.debug {
                    print_state(machine);
                }
            }
            Step::Halt(verdict) => {
                if cli.debug {
                    print_state(machine);
                }
                let outcome = match verdict {
                    Verdict::Accept => "accepted",
                    Verdict::Reject => "rejected",
                };
                println!("\nMachine halted ({outcome}): {}", machine.message());
                return;
            }
            Step::Noop => {
                println!("\n{}", machine.message());
                return;
            }
        }

        if let Some(delay) = cli.delay_ms {
            thread::sleep(Duration::from_millis(delay));
        }
    }

    println!(
        "\nStopped after {} steps without halting.",
        machine.step_count()
    );
}
