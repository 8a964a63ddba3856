// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::path::Path;

/// A file appender that never rotates, so the whole session ends up in the file at
/// `path_str`.
///
/// Note that if you wrap this up in a non blocking writer, it doesn't work. Here's an
/// example of this:
/// `tracing_appender::non_blocking(try_create("foo.log")?)`
///
/// # Errors
///
/// Returns an error if the path has no parent directory or no file name.
pub fn try_create(
    path_str: &str,
) -> miette::Result<tracing_appender::rolling::RollingFileAppender> {
    let path = Path::new(path_str);

    let file_name = path.file_name().ok_or_else(|| {
        miette::miette!("Can't get a file name from {}.", path.display())
    })?;

    // A bare file name has an empty parent, which means the current folder.
    let parent = match path.parent() {
        Some(parent) if parent.as_os_str().is_empty() => Path::new("."),
        Some(parent) => parent,
        None => miette::bail!("Can't get the parent folder of {}.", path.display()),
    };

    Ok(tracing_appender::rolling::never(parent, file_name))
}
