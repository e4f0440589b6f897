use std::fmt;

use docview_lib::context_trait;
use docview_api::{ApiClientError, RequestError};

type BoxDynError = Box<dyn std::error::Error + Send + Sync>;

/// an error message read from the outside in.
///
/// every call to [`Error::context`] puts another layer in front of the ones
/// already present. the cause, if there is one, is printed last.
#[derive(Debug)]
pub struct Error {
    layers: Vec<String>,
    cause: Option<BoxDynError>,
}

pub type Result<T = ()> = std::result::Result<T, Error>;

impl Error {
    pub fn msg<M>(msg: M) -> Error
    where
        M: Into<String>
    {
        Error {
            layers: vec![msg.into()],
            cause: None,
        }
    }

    pub fn caused_by<S>(cause: S) -> Error
    where
        S: Into<BoxDynError>
    {
        Error {
            layers: Vec::new(),
            cause: Some(cause.into()),
        }
    }

    pub fn context<C>(mut self, cxt: C) -> Error
    where
        C: Into<String>
    {
        self.layers.push(cxt.into());
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sep = "";

        for layer in self.layers.iter().rev() {
            write!(f, "{sep}{layer}")?;
            sep = ": ";
        }

        match &self.cause {
            Some(cause) => write!(f, "{sep}{cause}"),
            None if self.layers.is_empty() => f.write_str("unknown error"),
            None => Ok(())
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause.as_ref().map(|v| & **v as _)
    }
}

context_trait!(Error);

impl<T, E> Context<T, E> for std::result::Result<T, E>
where
    E: Into<BoxDynError>
{
    fn context<C>(self, cxt: C) -> std::result::Result<T, Error>
    where
        C: Into<String>
    {
        self.map_err(|err| Error::caused_by(err).context(cxt))
    }
}

impl<T> Context<T, ()> for std::option::Option<T> {
    fn context<C>(self, cxt: C) -> std::result::Result<T, Error>
    where
        C: Into<String>
    {
        self.ok_or_else(|| Error::msg(cxt))
    }
}

macro_rules! caused_by {
    ($($e:path),* $(,)?) => {
        $(
            impl From<$e> for Error {
                fn from(err: $e) -> Self {
                    Error::caused_by(err)
                }
            }
        )*
    };
}

caused_by!(
    std::io::Error,
    url::ParseError,
    serde_json::Error,
    serde_yaml::Error,
    handlebars::RenderError,
    handlebars::TemplateError,
    ApiClientError,
);

impl From<RequestError> for Error {
    fn from(err: RequestError) -> Self {
        let layer = match &err {
            RequestError::Reqwest(_) | RequestError::Url(_) => "error server request",
            RequestError::Status { .. } => "unexpected server response",
            RequestError::Invalid(_) => "invalid document",
        };

        Error::caused_by(err).context(layer)
    }
}
