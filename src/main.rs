#[cfg(target_arch = "wasm32")]
fn main() {
    console_error_panic_hook::set_once();
    yew::Renderer::<lyst_ui::app::App>::new().render();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!(
        "This crate targets WebAssembly. Use `trunk serve` to run the frontend. Do not `cargo run` this crate natively."
    );
    std::process::exit(1);
}
