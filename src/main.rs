use clap::{value_t, App, Arg};
use log::info;
use resolvesat::formula::dimacs::{parse, parse_file};
use resolvesat::solver::DEFAULT_CLAUSE_BUDGET;
use resolvesat::*;
use std::time::Instant;

fn main() {
    env_logger::init();

    let default_budget = DEFAULT_CLAUSE_BUDGET.to_string();
    let matches = App::new("resolvesat")
        .about("Decides CNF satisfiability by resolution, Davis-Putnam or DPLL")
        .arg(Arg::with_name("INPUT").help("input file (in CNF)").index(1))
        .arg(
            Arg::with_name("engine")
                .short("e")
                .long("engine")
                .takes_value(true)
                .possible_values(&["resolution", "dp", "dpll"])
                .default_value("dpll")
                .help("decision procedure to run"),
        )
        .arg(
            Arg::with_name("budget")
                .short("b")
                .long("budget")
                .takes_value(true)
                .default_value(&default_budget)
                .help("clauses resolution and dp may derive before giving up"),
        )
        .arg(
            Arg::with_name("dump-clauses")
                .long("dump-clauses")
                .help("print the input clauses in canonical order before solving"),
        )
        .get_matches();

    let engine = value_t!(matches, "engine", Engine).unwrap_or_else(|e| e.exit());
    let config = Config {
        clause_budget: value_t!(matches, "budget", usize).unwrap_or_else(|e| e.exit()),
    };

    let f = if let Some(path) = matches.value_of("INPUT") {
        parse_file(path)
    } else {
        parse(std::io::stdin())
    };

    match f {
        Ok(f) => {
            if matches.is_present("dump-clauses") {
                print!("{}", ClauseSet::from_formula(&f));
            }

            let start = Instant::now();
            let outcome = solve(&f, engine, &config);
            info!("{:?} finished in {:.6}s: {}", engine, start.elapsed().as_secs_f64(), outcome.stats);

            let exit_code = match outcome.result {
                SatResult::Satisfiable => {
                    println!("SATISFIABLE");
                    if let Some(model) = outcome.model {
                        print!("v");
                        for literal in model.complete(f.num_variables()) {
                            print!(" {}", literal);
                        }
                        println!(" 0");
                    }
                    0
                }
                SatResult::Unsatisfiable => {
                    println!("UNSATISFIABLE");
                    1
                }
                SatResult::BudgetExhausted => {
                    println!("INCONCLUSIVE (clause budget of {} exhausted)", config.clause_budget);
                    2
                }
            };
            std::process::exit(exit_code);
        }
        Err(e) => {
            eprintln!("parse error: {}", e);
            std::process::exit(-1);
        }
    }
}
