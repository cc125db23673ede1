fn main() {
    env_logger::init();
    croft::default().run();
}
