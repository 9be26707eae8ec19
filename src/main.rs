#[cfg(target_arch = "wasm32")]
pub fn main() {
    grandestay_web::start();
}

#[cfg(not(target_arch = "wasm32"))]
pub fn main() {}
