fn main() {
    if let Err(err) = course_graph_layout::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
