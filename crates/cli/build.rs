use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("cribro")
        .version("1.0.0")
        .author("Cribro Contributors")
        .about("Pre-filter web page markup before content extraction")
        .arg(clap::arg!(<INPUT> "Local HTML file, or '-' for stdin"))
        .arg(
            clap::arg!(-o --output <FILE> "Output file (default: stdout)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(clap::arg!(--report "Print the JSON run report instead of the optimized markup"))
        .arg(clap::arg!(--url <URL> "Source URL recorded in the report").value_name("URL"))
        .arg(clap::arg!(--title <TITLE> "Page title, folded into the scoring query").value_name("TITLE"))
        .arg(clap::arg!(-q --query <TEXT> "Query text to score blocks against").value_name("TEXT"))
        .arg(clap::arg!(--min_text_length <NUM> "Minimum candidate block length in characters").default_value("80"))
        .arg(clap::arg!(--content_ratio <RATIO> "Fraction of blocks retained by rank").default_value("0.2"))
        .arg(clap::arg!(--min_keep_k <NUM> "Absolute floor on rank-based retention").default_value("80"))
        .arg(clap::arg!(--max_link_density <RATIO> "Link density ceiling for the quality filter").default_value("0.3"))
        .arg(clap::arg!(--disabled "Bypass the pipeline"))
        .arg(clap::arg!(-v --verbose "Enable progress output"));

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "cribro", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "cribro", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "cribro", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "cribro", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
