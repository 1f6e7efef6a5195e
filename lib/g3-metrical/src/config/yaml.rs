/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, anyhow};
use humanize_rs::ParseError;
use humanize_rs::bytes::Bytes;
use log::Level;
use yaml_rust::{Yaml, yaml};

use super::{MetricalHandlerConfig, TextOutputConfig};
use crate::{FileOutputConfig, OutputBackendBuilder};

fn normalize_key(raw: &str) -> String {
    raw.to_lowercase().replace('-', "_")
}

fn foreach_kv<F>(table: &yaml::Hash, mut f: F) -> anyhow::Result<()>
where
    F: FnMut(&str, &Yaml) -> anyhow::Result<()>,
{
    for (k, v) in table.iter() {
        if let Yaml::String(key) = k {
            f(key, v).context(format!("failed to parse value of key {key}"))?;
        } else {
            return Err(anyhow!("key in hash should be string"));
        }
    }
    Ok(())
}

fn as_string(v: &Yaml) -> anyhow::Result<String> {
    match v {
        Yaml::String(s) => Ok(s.to_string()),
        Yaml::Integer(i) => Ok(i.to_string()),
        Yaml::Real(s) => Ok(s.to_string()),
        _ => Err(anyhow!("yaml value type for string should be 'string'")),
    }
}

fn as_humanize_usize(v: &Yaml) -> anyhow::Result<usize> {
    match v {
        Yaml::String(value) => {
            let v = value.parse::<Bytes>()?;
            Ok(v.size())
        }
        Yaml::Integer(value) => Ok(usize::try_from(*value)?),
        _ => Err(anyhow!(
            "yaml value type for humanize usize should be 'string' or 'integer'"
        )),
    }
}

fn as_humanize_duration(v: &Yaml) -> anyhow::Result<Duration> {
    match v {
        Yaml::String(value) => match humanize_rs::duration::parse(value) {
            Ok(v) => Ok(v),
            Err(ParseError::MissingUnit) => {
                let u = u64::from_str(value).map_err(|_| anyhow!("invalid duration string"))?;
                Ok(Duration::from_secs(u))
            }
            Err(e) => Err(anyhow!("invalid humanize duration string: {e}")),
        },
        Yaml::Integer(value) => {
            let u = u64::try_from(*value).map_err(|_| anyhow!("negative duration value"))?;
            Ok(Duration::from_secs(u))
        }
        _ => Err(anyhow!(
            "yaml value type for humanize duration should be 'string' or 'integer'"
        )),
    }
}

impl FileOutputConfig {
    pub fn parse_yaml(v: &Yaml) -> anyhow::Result<Self> {
        match v {
            Yaml::Hash(map) => {
                let mut path_stem: Option<PathBuf> = None;
                let mut path_suffix = String::new();

                foreach_kv(map, |k, v| match normalize_key(k).as_str() {
                    "path_stem" | "stem" => {
                        path_stem = Some(PathBuf::from(as_string(v)?));
                        Ok(())
                    }
                    "path_suffix" | "suffix" => {
                        path_suffix = as_string(v)?;
                        Ok(())
                    }
                    _ => Err(anyhow!("invalid key {k}")),
                })?;

                if let Some(stem) = path_stem.take() {
                    Ok(FileOutputConfig::new(stem, path_suffix))
                } else {
                    Err(anyhow!("no path stem has been set"))
                }
            }
            Yaml::String(s) => Ok(FileOutputConfig::new(PathBuf::from(s), String::new())),
            _ => Err(anyhow!("invalid yaml value for file output")),
        }
    }
}

impl OutputBackendBuilder {
    pub fn parse_yaml(v: &Yaml) -> anyhow::Result<Self> {
        match v {
            Yaml::String(s) => match normalize_key(s).as_str() {
                "stdout" => Ok(OutputBackendBuilder::Stdout),
                "stderr" => Ok(OutputBackendBuilder::Stderr),
                "log" => Ok(OutputBackendBuilder::Log(Level::Info)),
                _ => Err(anyhow!("unsupported output backend {s}")),
            },
            Yaml::Hash(map) => {
                let mut backend: Option<OutputBackendBuilder> = None;
                foreach_kv(map, |k, v| match normalize_key(k).as_str() {
                    "log" => {
                        let level = as_string(v)?;
                        let level = Level::from_str(&level)
                            .map_err(|e| anyhow!("invalid log level {level}: {e}"))?;
                        backend = Some(OutputBackendBuilder::Log(level));
                        Ok(())
                    }
                    "file" => {
                        let config = FileOutputConfig::parse_yaml(v)
                            .context(format!("invalid value for key {k}"))?;
                        backend = Some(OutputBackendBuilder::File(config));
                        Ok(())
                    }
                    _ => Err(anyhow!("invalid key {k}")),
                })?;
                backend.ok_or_else(|| anyhow!("no output backend has been set"))
            }
            _ => Err(anyhow!("invalid yaml value for output backend")),
        }
    }
}

impl TextOutputConfig {
    pub fn parse_yaml(v: &Yaml) -> anyhow::Result<Self> {
        if let Yaml::Hash(map) = v {
            let mut config = TextOutputConfig::default();
            foreach_kv(map, |k, v| config.set_by_yaml_kv(k, v))?;
            Ok(config)
        } else {
            Err(anyhow!(
                "yaml value type for 'text output config' should be 'map'"
            ))
        }
    }

    fn set_by_yaml_kv(&mut self, k: &str, v: &Yaml) -> anyhow::Result<()> {
        match normalize_key(k).as_str() {
            "type" => {}
            "backend" | "output" => {
                let backend = OutputBackendBuilder::parse_yaml(v)
                    .context(format!("invalid value for key {k}"))?;
                self.set_backend(backend);
            }
            "namespace" => {
                let namespace = as_string(v).context(format!("invalid value for key {k}"))?;
                self.set_namespace(namespace);
            }
            "rotate_size" | "rotate_size_limit" => {
                let size = as_humanize_usize(v)
                    .context(format!("invalid humanize usize value for key {k}"))?;
                self.set_rotate_size_limit(size);
            }
            "rotate_interval" | "rotate_time_limit" => {
                let interval = as_humanize_duration(v)
                    .context(format!("invalid humanize duration value for key {k}"))?;
                self.set_rotate_time_limit(interval);
            }
            _ => return Err(anyhow!("invalid key {k}")),
        }
        Ok(())
    }
}

impl MetricalHandlerConfig {
    /// Parse a handler config.
    ///
    /// A string selects a handler or an output by name with default settings.
    /// A sequence is a fork of all the handlers in it. A map needs a `type`
    /// key.
    pub fn parse_yaml(v: &Yaml) -> anyhow::Result<Self> {
        match v {
            Yaml::String(s) => match normalize_key(s).as_str() {
                "null" | "none" => Ok(MetricalHandlerConfig::Null),
                "text" => Ok(MetricalHandlerConfig::Text(TextOutputConfig::default())),
                _ => {
                    let backend = OutputBackendBuilder::parse_yaml(v)?;
                    Ok(MetricalHandlerConfig::Text(TextOutputConfig::new(backend)))
                }
            },
            Yaml::Null => Ok(MetricalHandlerConfig::Null),
            Yaml::Array(seq) => Self::parse_fork_handlers(seq),
            Yaml::Hash(map) => {
                let handler_type = match map.get(&Yaml::String("type".to_string())) {
                    Some(Yaml::Null) => return Ok(MetricalHandlerConfig::Null),
                    Some(v) => as_string(v)?,
                    None => return Err(anyhow!("no handler type has been set")),
                };
                match normalize_key(&handler_type).as_str() {
                    "null" | "none" => Ok(MetricalHandlerConfig::Null),
                    "text" => {
                        let config = TextOutputConfig::parse_yaml(v)?;
                        Ok(MetricalHandlerConfig::Text(config))
                    }
                    "fork" => {
                        let mut handlers = Vec::new();
                        foreach_kv(map, |k, v| match normalize_key(k).as_str() {
                            "type" => Ok(()),
                            "handlers" => {
                                if let Yaml::Array(seq) = v {
                                    if let MetricalHandlerConfig::Fork(h) =
                                        Self::parse_fork_handlers(seq)?
                                    {
                                        handlers = h;
                                    }
                                    Ok(())
                                } else {
                                    Err(anyhow!("yaml value type for key {k} should be 'seq'"))
                                }
                            }
                            _ => Err(anyhow!("invalid key {k}")),
                        })?;
                        Ok(MetricalHandlerConfig::Fork(handlers))
                    }
                    _ => Err(anyhow!("unsupported handler type {handler_type}")),
                }
            }
            _ => Err(anyhow!("invalid yaml value for metrical handler")),
        }
    }

    fn parse_fork_handlers(seq: &[Yaml]) -> anyhow::Result<Self> {
        let mut handlers = Vec::with_capacity(seq.len());
        for (i, v) in seq.iter().enumerate() {
            let handler = MetricalHandlerConfig::parse_yaml(v)
                .context(format!("invalid handler config #{i}"))?;
            handlers.push(handler);
        }
        Ok(MetricalHandlerConfig::Fork(handlers))
    }
}
