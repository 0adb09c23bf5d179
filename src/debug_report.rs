use chainroute::{Description, DescribedRoute, Dispatch, DispatchTrace, Rejection, RequestDescriptor, RouteTable};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const RED: &str = "\x1b[31m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

pub fn print_tables(description: &Description, color: bool) {
    let palette = ansi::Palette::new(color);

    println!("\n{}", palette.paint("━━━ Loaded Path actions ━━━", ansi::GRAY));
    print_table(&description.paths, "Path", &palette);

    println!("\n{}", palette.paint("━━━ Loaded Chained actions ━━━", ansi::GRAY));
    print_table(&description.chains, "Path Spec", &palette);
    println!();
}

fn print_table(rows: &[DescribedRoute], heading: &str, palette: &ansi::Palette) {
    if rows.is_empty() {
        println!("  {}", palette.dim("(none)"));
        return;
    }

    let width = rows.iter().map(|r| r.path_spec.chars().count()).max().unwrap_or_default().max(heading.len());
    println!("  {}  {}", palette.bold(format!("{heading:<width$}")), palette.bold("Private"));
    for row in rows {
        for (i, private) in row.privates.iter().enumerate() {
            let spec = if i == 0 { row.path_spec.as_str() } else { "" };
            let spec = format!("{spec:<width$}");
            let spec = if row.reachable { palette.paint(spec, ansi::CYAN) } else { palette.dim(spec) };
            println!("  {}  {}", spec, palette.paint(private, ansi::BLUE));
        }
    }
}

pub fn print_dispatch(table: &RouteTable, request: &RequestDescriptor, trace: &DispatchTrace<'_>, color: bool) {
    let palette = ansi::Palette::new(color);
    println!(
        "\n{}",
        palette.bold(palette.paint(format!("⚙  Dispatching: {} {}", request.method(), request.path()), ansi::CYAN))
    );

    println!("\n{}", palette.paint("━━━ Candidates ━━━", ansi::GRAY));
    if trace.attempts.is_empty() {
        println!("  {}", palette.dim("No candidate fits the path shape"));
    }
    for (idx, attempt) in trace.attempts.iter().enumerate() {
        let verdict = match attempt.rejection {
            None => palette.paint("✓ accepted", ansi::GREEN),
            Some(rejection) => palette.paint(format!("✗ {}", describe_rejection(table, rejection)), ansi::RED),
        };
        println!(
            "  {} {} {} {}",
            palette.paint(format!("[{idx}]"), ansi::GRAY),
            palette.paint(attempt.chain.join(" → "), ansi::BLUE),
            palette.dim(format!(
                "│ path {} │ {}",
                attempt.path_len,
                if attempt.bounded { "bounded" } else { "unbounded" }
            )),
            verdict
        );
    }

    println!("\n{}", palette.paint("━━━ Result ━━━", ansi::GRAY));
    match &trace.outcome {
        Dispatch::Matched(matched) => {
            println!("  {}", palette.bold(palette.paint(&matched.terminal().name, ansi::GREEN)));
            println!(
                "      {} {}  {} {}",
                palette.dim("captures:"),
                palette.paint(format!("{:?}", matched.captures()), ansi::YELLOW),
                palette.dim("│ args:"),
                palette.paint(format!("{:?}", matched.args()), ansi::YELLOW)
            );
        }
        Dispatch::NoMatch => {
            println!("  {}", palette.paint("No matching action", ansi::RED));
            println!("\n{}", palette.paint("Possible reasons:", ansi::YELLOW));
            println!("  • No literal path prefix matches the request");
            println!("  • Argument or capture counts do not add up to the segment count");
            println!("  • Every candidate failed its method or type constraints");
            println!("\n{}", palette.dim("  Tip: Set RUST_LOG=chainroute=trace to see every rejection"));
        }
    }

    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    println!(
        "  Total: {}  │  Collect: {}  │  Validate: {}  │  Tried: {}/{}",
        palette.paint(format!("{:?}", trace.metrics.total), ansi::GREEN),
        palette.paint(format!("{:?}", trace.metrics.collect), ansi::CYAN),
        palette.dim(format!("{:?}", trace.metrics.validate)),
        trace.metrics.tried,
        trace.metrics.candidates(),
    );
    println!();
}

fn describe_rejection(table: &RouteTable, rejection: Rejection) -> String {
    let name = table.get(rejection.action()).map(|a| a.name.as_str()).unwrap_or("?");
    match rejection {
        Rejection::Method(_) => format!("method not accepted by {name}"),
        Rejection::Capture(_) => format!("captures rejected by {name}"),
        Rejection::Args(_) => format!("args rejected by {name}"),
    }
}
