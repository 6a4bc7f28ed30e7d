cfg_if! {
    if #[cfg(target_arch = "wasm32")] {
        compile_error!("wasm targets are not supported by the 'vitals_shared' crate's timer backend.");
    } else {
        mod native;
        pub use native::Timer;
    }
}
