// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{DisplayPreference, PromptWriter, TracingConfig, WriterConfig,
            tracing_logging::rolling_file_appender_impl};
use miette::IntoDiagnostic;
use tracing_core::LevelFilter;
use tracing_subscriber::{Layer, layer::SubscriberExt, registry::LookupSpan,
                         util::SubscriberInitExt};

/// Avoid gnarly type annotations by using a macro to create the `fmt` layer.
#[macro_export]
macro_rules! create_fmt {
    () => {
        tracing_subscriber::fmt::layer()
            .compact()
            .without_time()
            .with_thread_ids(true)
            .with_thread_names(false)
            .with_target(false)
            .with_file(false)
            .with_line_number(false)
            .with_ansi(true)
    };
}

/// Type alias for a boxed layer.
pub type DynLayer<S> = dyn Layer<S> + Send + Sync + 'static;

/// Initialize the global tracing system with the provided [`TracingConfig`]. Does
/// nothing for [`WriterConfig::None`].
///
/// # Errors
///
/// Returns an error if the log file can't be created, or a global subscriber is
/// already set.
pub fn init(tracing_config: TracingConfig) -> miette::Result<()> {
    let Some(layers) = try_create_layers(tracing_config)? else {
        return Ok(());
    };
    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .into_diagnostic()
}

/// Returns the layers. This does not initialize the tracing system. Don't forget to do
/// this manually, by calling `init` on the returned layers.
///
/// For example, once you have the layers, you can run the following:
/// `try_create_layers(..).map(|layers|
/// tracing_subscriber::registry().with(layers).init());`
///
/// # Errors
///
/// Returns an error if the log file can't be created.
pub fn try_create_layers(
    tracing_config: TracingConfig,
) -> miette::Result<Option<Vec<Box<DynLayer<tracing_subscriber::Registry>>>>> {
    if let WriterConfig::None = tracing_config.writer_config {
        return Ok(None);
    }

    let level_filter = tracing_config.get_level_filter();
    let mut return_it: Vec<Box<DynLayer<tracing_subscriber::Registry>>> = vec![];

    // Set the level filter from the tracing configuration. This is needed if you add
    // more layers, like OpenTelemetry, which don't have a level filter.
    return_it.push(Box::new(level_filter));

    if let Some(layer) =
        try_create_display_layer(level_filter, tracing_config.get_writer_config())?
    {
        return_it.push(layer);
    }

    if let Some(layer) =
        try_create_file_layer(level_filter, tracing_config.get_writer_config())?
    {
        return_it.push(layer);
    }

    Ok(Some(return_it))
}

/// This erases the concrete type of the writer, and returns a boxed layer.
///
/// This is useful for composition of layers. There's more info in the docs
/// [here](https://docs.rs/tracing-subscriber/latest/tracing_subscriber/layer/index.html#runtime-configuration-with-layers).
///
/// # Errors
///
/// Currently infallible, the [`Result`] keeps the signature in line with
/// [`try_create_file_layer()`].
#[allow(clippy::unnecessary_wraps)]
pub fn try_create_display_layer<S>(
    level_filter: LevelFilter,
    writer_config: WriterConfig,
) -> miette::Result<Option<Box<DynLayer<S>>>>
where
    S: tracing_core::Subscriber,
    for<'a> S: LookupSpan<'a>,
{
    // Shared configuration regardless of where logs are output to.
    let fmt_layer = create_fmt!();

    // Configure the writer based on the desired log target, and return it.
    Ok(match writer_config {
        WriterConfig::DisplayAndFile(display_pref, _)
        | WriterConfig::Display(display_pref) => match display_pref {
            DisplayPreference::Stdout => Some(Box::new(
                fmt_layer
                    .with_writer(std::io::stdout)
                    .with_filter(level_filter),
            )),
            DisplayPreference::Stderr => Some(Box::new(
                fmt_layer
                    .with_writer(std::io::stderr)
                    .with_filter(level_filter),
            )),
            DisplayPreference::Prompt(prompt) => {
                // Only a weak reference is captured, so that installing this layer
                // doesn't keep the prompt (or its input loop) alive.
                let prompt_writer = PromptWriter::new(&prompt);
                drop(prompt);
                let tracing_writer = move || prompt_writer.clone();
                // Escape sequences would be measured as glyphs by the prompt.
                Some(Box::new(
                    fmt_layer
                        .with_ansi(false)
                        .with_writer(tracing_writer)
                        .with_filter(level_filter),
                ))
            }
        },
        _ => None,
    })
}

/// This erases the concrete type of the writer, and returns a boxed layer.
///
/// This is useful for composition of layers. There's more info in the docs
/// [here](https://docs.rs/tracing-subscriber/latest/tracing_subscriber/layer/index.html#runtime-configuration-with-layers).
///
/// # Errors
///
/// Returns an error if the log file can't be created.
pub fn try_create_file_layer<S>(
    level_filter: LevelFilter,
    writer_config: WriterConfig,
) -> miette::Result<Option<Box<DynLayer<S>>>>
where
    S: tracing_core::Subscriber,
    for<'a> S: LookupSpan<'a>,
{
    // Shared configuration regardless of where logs are output to.
    let fmt_layer = create_fmt!();

    // Configure the writer based on the desired log target, and return it.
    Ok(match writer_config {
        WriterConfig::DisplayAndFile(_, tracing_log_file_path)
        | WriterConfig::File(tracing_log_file_path) => {
            let file = rolling_file_appender_impl::try_create(&tracing_log_file_path)?;
            Some(Box::new(
                fmt_layer
                    .with_ansi(false)
                    .with_writer(file)
                    .with_filter(level_filter),
            ))
        }
        _ => None,
    })
}
