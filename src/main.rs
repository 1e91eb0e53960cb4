use funplot::pipeline::parse_function::FunctionPlotter;

fn main() {
    let mut args: Vec<String> = std::env::args().skip(1).collect();

    let mut plotter = FunctionPlotter::new();
    if let Some(first) = args.first() {
        if let Some(level) = first.strip_prefix("--loglevel=") {
            plotter.loglevel = Some(level.to_string());
            args.remove(0);
        }
    }

    let solution = plotter.solve(&args.join(" "));
    match serde_json::to_string_pretty(&solution) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("could not serialize solution: {}", e),
    }
}
