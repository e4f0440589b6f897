use std::path::{Path, PathBuf};
use std::default::Default;
use std::fmt::{Display, Formatter};
use std::time::Duration;

use docview_api::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
use docview_lib::query::{PageQuery, Skip, Limit};
use url::Url;

use crate::error::{self, Context};
use crate::render::Format;
use crate::view::FetchPolicy;

mod shape;

/// values given on the command line, applied after every config file
#[derive(Debug, Default)]
pub struct Overrides {
    pub base_url: Option<Url>,
    pub skip: Option<Skip>,
    pub limit: Option<Limit>,
    pub mount_only: bool,
    pub format: Option<Format>,
}

#[derive(Debug)]
pub struct Settings {
    pub service: Service,
    pub view: View,
}

impl Settings {
    /// defaults, then each file in the order given. relative paths are
    /// resolved against `cwd`.
    pub fn load<P>(cwd: &Path, files: &[P]) -> error::Result<Self>
    where
        P: AsRef<Path>
    {
        let mut settings = Settings::default();

        for config_path in files {
            let config_path = config_path.as_ref();
            let full = if config_path.is_absolute() {
                config_path.to_path_buf()
            } else {
                cwd.join(config_path)
            };

            tracing::debug!("loading config file \"{}\"", full.display());

            let loaded = Self::load_file(&full)?;
            let src = SrcFile::new(&full);
            let dot = DotPath::new(&"settings");

            settings.merge(&src, dot, loaded)?;
        }

        Ok(settings)
    }

    fn load_file(path: &PathBuf) -> error::Result<shape::Settings> {
        let ext = path.extension().context(format!(
            "failed to retrieve the file extension for config file: \"{}\"", path.display()
        ))?;

        let ext = ext.to_ascii_lowercase();
        let file = std::fs::OpenOptions::new()
            .read(true)
            .open(path)
            .context(format!("failed to open config file: \"{}\"", path.display()))?;
        let reader = std::io::BufReader::new(file);

        if ext.eq("yaml") || ext.eq("yml") {
            serde_yaml::from_reader(reader).context(format!(
                "failed to parse yaml config file: \"{}\"", path.display()
            ))
        } else if ext.eq("json") {
            serde_json::from_reader(reader).context(format!(
                "failed to parse json config file: \"{}\"", path.display()
            ))
        } else {
            Err(error::Error::msg(format!(
                "unknown type of config file: \"{}\"", path.display()
            )))
        }
    }

    fn merge(&mut self, src: &SrcFile<'_>, dot: DotPath<'_>, settings: shape::Settings) -> error::Result<()> {
        if let Some(service) = settings.service {
            self.service.merge(src, dot.push(&"service"), service)?;
        }

        if let Some(view) = settings.view {
            self.view.merge(src, dot.push(&"view"), view)?;
        }

        Ok(())
    }

    pub fn apply(&mut self, overrides: Overrides) -> error::Result<()> {
        if let Some(base_url) = overrides.base_url {
            self.service.base_url = base_url;
        }

        if let Some(skip) = overrides.skip {
            self.view.page.skip = skip;
        }

        if let Some(limit) = overrides.limit {
            if limit == 0 {
                return Err(error::Error::msg("--limit must be greater than 0"));
            }

            self.view.page.limit = limit;
        }

        if overrides.mount_only {
            self.view.policy = FetchPolicy::MountOnly;
        }

        if let Some(format) = overrides.format {
            self.view.format = format;
        }

        tracing::debug!("{:#?}", self);

        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            service: Service::default(),
            view: View::default(),
        }
    }
}

#[derive(Debug)]
pub struct Service {
    pub base_url: Url,
    pub user_agent: String,
    pub timeout: Duration,
}

impl Service {
    fn merge(&mut self, src: &SrcFile<'_>, dot_path: DotPath<'_>, service: shape::Service) -> error::Result<()> {
        if let Some(base_url) = service.base_url {
            self.base_url = Url::parse(&base_url).context(format!(
                "{}.base_url invalid: \"{base_url}\" file: {src}", dot_path
            ))?;
        }

        if let Some(user_agent) = service.user_agent {
            self.user_agent = user_agent;
        }

        if let Some(timeout) = service.timeout {
            if timeout == 0 {
                return Err(error::Error::msg(format!(
                    "{}.timeout must be greater than 0 file: {src}", dot_path
                )));
            }

            self.timeout = Duration::from_secs(timeout);
        }

        Ok(())
    }
}

impl Default for Service {
    fn default() -> Self {
        Service {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base url is valid"),
            user_agent: String::from(DEFAULT_USER_AGENT),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[derive(Debug)]
pub struct View {
    pub page: PageQuery,
    pub policy: FetchPolicy,
    pub format: Format,
}

impl View {
    fn merge(&mut self, src: &SrcFile<'_>, dot_path: DotPath<'_>, view: shape::View) -> error::Result<()> {
        if let Some(skip) = view.skip {
            self.page.skip = skip;
        }

        if let Some(limit) = view.limit {
            if limit == 0 {
                return Err(error::Error::msg(format!(
                    "{}.limit must be greater than 0 file: {src}", dot_path
                )));
            }

            self.page.limit = limit;
        }

        if let Some(fetch_on_change) = view.fetch_on_change {
            self.policy = if fetch_on_change {
                FetchPolicy::OnChange
            } else {
                FetchPolicy::MountOnly
            };
        }

        if let Some(format) = view.format {
            self.format = format;
        }

        Ok(())
    }
}

impl Default for View {
    fn default() -> Self {
        View {
            page: PageQuery::default(),
            policy: FetchPolicy::default(),
            format: Format::default(),
        }
    }
}

struct SrcFile<'a> {
    src: &'a Path,
}

impl<'a> SrcFile<'a> {
    fn new(src: &'a Path) -> Self {
        SrcFile { src }
    }
}

impl<'a> Display for SrcFile<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"{}\"", self.src.display())
    }
}

struct DotPath<'a>(Vec<&'a dyn Display>);

impl<'a> DotPath<'a> {
    fn new(name: &'a (dyn Display)) -> Self {
        DotPath(vec![name])
    }

    fn push(&self, name: &'a (dyn Display)) -> Self {
        let mut path = self.0.clone();
        path.push(name);

        DotPath(path)
    }
}

impl<'a> Display for DotPath<'a> {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> std::fmt::Result {
        let mut first = true;

        for name in &self.0 {
            if first {
                write!(fmt, "{name}")?;
                first = false;
            } else {
                write!(fmt, ".{name}")?;
            }
        }

        Ok(())
    }
}
