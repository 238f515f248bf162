// This is free and unencumbered software released into the public domain.

//! Log sink setup for hosts that load the library without a tracing subscriber.
//!
//! Library code logs through `tracing`; with no subscriber installed those
//! events fall through to the `log` facade, which on Android is routed to
//! logcat under the `ndcam` tag.

/// Routes library logs to logcat. Safe to call more than once.
#[cfg(all(feature = "android", target_os = "android"))]
pub fn init_android_logger() {
    android_logger::init_once(
        android_logger::Config::default()
            .with_tag("ndcam")
            .with_max_level(log::LevelFilter::Trace)
            .with_filter(
                android_logger::FilterBuilder::new()
                    .filter_level(log::LevelFilter::Debug)
                    .build(),
            ),
    );
}

#[cfg(not(all(feature = "android", target_os = "android")))]
#[inline]
pub fn init_android_logger() {}
