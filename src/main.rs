fn main() -> eframe::Result {
    env_logger::init();
    smartscope::run_gui()
}
