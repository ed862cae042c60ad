use extreme_dodge::app;

fn main() {
    app::run();
}
