use clap::{Arg, Command};
use color_eyre::eyre::{eyre, Result};
use fasim::{
    process_automata_list, read_automata_file, visualize, Automaton, AutomatonDescription, AutomatonId,
    DefectFormat, ProcessOptions,
};
use log::info;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

fn main() -> Result<()> {
    color_eyre::install()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Command::new("fasim")
                        .version("1.0")
                        .author("Nagendra Kumar Jamadagni")
                        .about("Validate deterministic finite automata described in JSON and check which strings they accept")
                        .arg(
                            Arg::new("input")
                            .short('i')
                            .long("input")
                            .help("JSON file holding a list of automata to validate and simulate")
                            .value_name("INPUT JSON FILE")
                            .value_parser(clap::value_parser!(PathBuf))
                            .required(true)
                        )
                        .arg(
                            Arg::new("output")
                            .short('o')
                            .long("output")
                            .help("The output file to store the results. Printed to stdout if not provided")
                            .value_name("OUTPUT JSON FILE")
                            .value_parser(clap::value_parser!(PathBuf))
                        )
                        .arg(
                            Arg::new("diagram-dir")
                            .short('d')
                            .long("diagram-dir")
                            .help("Render a Graphviz diagram of every valid automaton into this directory")
                            .value_name("DIAGRAM DIRECTORY")
                            .value_parser(clap::value_parser!(PathBuf))
                        )
                        .arg(
                            Arg::new("first-error")
                            .long("first-error")
                            .help("Report only the first defect of an invalid automaton instead of all of them")
                            .action(clap::ArgAction::SetTrue)
                        )
                        .arg(
                            Arg::new("sequential")
                            .long("sequential")
                            .help("Simulate strings one after the other instead of in parallel")
                            .action(clap::ArgAction::SetTrue)
                        )
                        .arg(
                            Arg::new("visualize")
                            .short('v')
                            .long("visualize")
                            .help("Visualize the automaton with this id inside an interactive window that allows for zooming, panning and clicking of elements")
                            .value_name("AUTOMATON ID")
                            .value_parser(clap::value_parser!(String))
                            .num_args(1)
                        )
                        .get_matches();

    let input_path = match args.get_one::<PathBuf>("input") {
        Some(file_path) => file_path,
        None => return Err(eyre!("Error: Input file not provided!")),
    };

    let defect_format = if args.get_flag("first-error") {
        DefectFormat::First
    } else {
        DefectFormat::Full
    };

    let options = ProcessOptions {
        parallel: !args.get_flag("sequential"),
        defect_format,
        diagram_dir: args.get_one::<PathBuf>("diagram-dir").cloned(),
    };

    let entries = read_automata_file(input_path)?;
    info!("Loaded {} automata from {}", entries.len(), input_path.display());

    // Keep the requested entry around, processing consumes the list
    let visualize_id = args.get_one::<String>("visualize");
    let visualize_entry = visualize_id.and_then(|id| {
        entries
            .iter()
            .find(|entry| {
                entry
                    .get("id")
                    .and_then(|value| serde_json::from_value::<AutomatonId>(value.clone()).ok())
                    .is_some_and(|entry_id| entry_id.to_string() == *id)
            })
            .cloned()
    });

    let reports = process_automata_list(entries, &options);
    let json_string = serde_json::to_string_pretty(&reports)?;

    match args.get_one::<PathBuf>("output") {
        Some(out_file_path) => {
            let mut out_file = File::create(out_file_path)?;
            writeln!(out_file, "{}", json_string)?;
        }
        None => println!("{}", json_string),
    }

    if let Some(id) = visualize_id {
        let entry = match visualize_entry {
            Some(entry) => entry,
            None => return Err(eyre!("Error: No automaton with id {} was provided!", id)),
        };

        let description: AutomatonDescription = serde_json::from_value(entry)?;
        let automaton = Automaton::from(description);

        if !fasim::validate(&automaton).is_valid() {
            return Err(eyre!("Error: Automaton {} is not well formed and cannot be visualized!", id));
        }

        visualize(&automaton)?;
    }

    Ok(())
}
