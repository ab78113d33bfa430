//! Projection of a chunk into each artifact kind.
//!
//! Each renderer is a pure function of (chunk, language, configuration).
//! Values missing for a language fall back to the default language, so no
//! key ever resolves to nothing in a generated file.

use enum_dispatch::enum_dispatch;

use crate::config::Config;
use crate::core::chunk::{Chunk, LanguageSet};
use crate::core::markup::{Markup, Tree, flat_value, js_member_access};
use crate::core::paths::ArtifactKind;
use crate::error::{ResxError, Result};

/// Everything a renderer may read besides the chunk itself.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub config: &'a Config,
    pub languages: &'a LanguageSet,
    pub markup: Markup,
}

impl RenderContext<'_> {
    /// `(key, value)` pairs for `lang` in key order, with default-language
    /// fallback applied.
    pub fn resolved_values<'c>(&self, chunk: &'c Chunk, lang: &str) -> Result<Vec<(&'c str, &'c str)>> {
        chunk
            .entries
            .iter()
            .map(|entry| {
                let value = entry.resolve(lang, self.languages).ok_or_else(|| {
                    ResxError::invalid_source(
                        &chunk.name,
                        format!(
                            "key '{}' has no value for default language '{}'",
                            entry.key,
                            self.languages.default_lang()
                        ),
                    )
                })?;
                Ok((entry.key.as_str(), value))
            })
            .collect()
    }
}

#[enum_dispatch]
pub trait Render {
    fn kind(&self) -> ArtifactKind;

    /// Full file content. `lang` is ignored by language-invariant kinds.
    fn render(&self, chunk: &Chunk, lang: &str, ctx: &RenderContext<'_>) -> Result<String>;
}

#[enum_dispatch(Render)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    RuntimeObject(RuntimeObject),
    TypeDeclaration(TypeDeclaration),
    FlatFile(FlatFile),
}

impl Artifact {
    pub fn all() -> [Artifact; 3] {
        ArtifactKind::ALL.map(Artifact::for_kind)
    }

    pub fn for_kind(kind: ArtifactKind) -> Self {
        match kind {
            ArtifactKind::RuntimeObject => RuntimeObject.into(),
            ArtifactKind::TypeDeclaration => TypeDeclaration.into(),
            ArtifactKind::FlatFile => FlatFile.into(),
        }
    }
}

/// JavaScript file that registers the chunk's strings for one language under
/// `<jsNamespace>.<currentLangNS>.<chunk>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeObject;

impl Render for RuntimeObject {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::RuntimeObject
    }

    fn render(&self, chunk: &Chunk, lang: &str, ctx: &RenderContext<'_>) -> Result<String> {
        let tree: Tree = ctx.resolved_values(chunk, lang)?.into_iter().collect();

        let mut out = String::new();
        let mut target = String::new();
        let segments = ctx
            .config
            .js_namespace_segments()
            .chain(std::iter::once(ctx.config.current_lang_ns.as_str()));
        for segment in segments {
            if target.is_empty() {
                target = segment.to_string();
                out.push_str(&format!("var {0} = {0} || {{}};\n", target));
            } else {
                target = js_member_access(&target, segment);
                out.push_str(&format!("{0} = {0} || {{}};\n", target));
            }
        }

        out.push_str(&format!(
            "{} = {};\n",
            js_member_access(&target, &chunk.name),
            ctx.markup.js_object(&tree, 0)
        ));
        Ok(out)
    }
}

/// TypeScript declaration merged into the global `tsGlobInterface`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeDeclaration;

impl Render for TypeDeclaration {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::TypeDeclaration
    }

    fn render(&self, chunk: &Chunk, _lang: &str, ctx: &RenderContext<'_>) -> Result<String> {
        let default_lang = ctx.languages.default_lang();
        let keys: Tree = ctx.resolved_values(chunk, default_lang)?.into_iter().collect();
        let shape = Tree::new().branch(chunk.name.as_str(), keys);

        Ok(format!(
            "interface {} {}\n",
            ctx.config.ts_glob_interface,
            ctx.markup.ts_shape(&shape, 0)
        ))
    }
}

/// `<resxPrefix>.<chunk>.<key>=<value>` lines for one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlatFile;

impl Render for FlatFile {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::FlatFile
    }

    fn render(&self, chunk: &Chunk, lang: &str, ctx: &RenderContext<'_>) -> Result<String> {
        let mut out = String::new();
        for (key, value) in ctx.resolved_values(chunk, lang)? {
            out.push_str(&format!(
                "{}.{}.{}={}\n",
                ctx.config.resx_prefix,
                chunk.name,
                key,
                flat_value(value)
            ));
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::chunk::KeyEntry;
    use insta::assert_snapshot;

    fn config() -> Config {
        Config {
            resx_prefix: "prefix".to_string(),
            languages: vec!["en".to_string(), "ru".to_string()],
            default_lang: "en".to_string(),
            ..Default::default()
        }
    }

    fn greeting() -> Chunk {
        let entry = |key: &str, pairs: &[(&str, &str)]| KeyEntry {
            key: key.to_string(),
            values: pairs
                .iter()
                .map(|(l, v)| (l.to_string(), v.to_string()))
                .collect(),
        };
        Chunk {
            name: "greeting".to_string(),
            entries: vec![
                entry("hello", &[("en", "Hello"), ("ru", "Привет")]),
                entry("hello2", &[("en", "Bye")]),
            ],
        }
    }

    fn render(artifact: Artifact, config: &Config, chunk: &Chunk, lang: &str) -> String {
        let languages = LanguageSet::from_config(config);
        let ctx = RenderContext {
            config,
            languages: &languages,
            markup: Markup::new(config.tab_size),
        };
        artifact.render(chunk, lang, &ctx).unwrap()
    }

    #[test]
    fn test_runtime_object_with_fallback() {
        let config = config();
        let output = render(RuntimeObject.into(), &config, &greeting(), "ru");
        assert_snapshot!(output, @r#"
        var Resx = Resx || {};
        Resx.current = Resx.current || {};
        Resx.current.greeting = {
            hello: "Привет",
            hello2: "Bye"
        };
        "#);
    }

    #[test]
    fn test_runtime_object_dotted_namespace() {
        let config = Config {
            js_namespace: "App.Res".to_string(),
            current_lang_ns: "lang".to_string(),
            tab_size: 2,
            ..config()
        };
        let chunk = Chunk {
            name: "main-page".to_string(),
            ..greeting()
        };
        let output = render(RuntimeObject.into(), &config, &chunk, "en");
        assert_eq!(
            output,
            "var App = App || {};\n\
             App.Res = App.Res || {};\n\
             App.Res.lang = App.Res.lang || {};\n\
             App.Res.lang[\"main-page\"] = {\n  hello: \"Hello\",\n  hello2: \"Bye\"\n};\n"
        );
    }

    #[test]
    fn test_type_declaration() {
        let config = config();
        let output = render(TypeDeclaration.into(), &config, &greeting(), "ru");
        assert_snapshot!(output, @r"
        interface IResx {
            greeting: {
                hello: string;
                hello2: string;
            };
        }
        ");
    }

    #[test]
    fn test_type_declaration_is_language_invariant() {
        let config = config();
        let chunk = greeting();
        assert_eq!(
            render(TypeDeclaration.into(), &config, &chunk, "en"),
            render(TypeDeclaration.into(), &config, &chunk, "ru")
        );
    }

    #[test]
    fn test_flat_file_with_fallback() {
        let config = config();
        let chunk = greeting();
        assert_eq!(
            render(FlatFile.into(), &config, &chunk, "ru"),
            "prefix.greeting.hello=Привет\nprefix.greeting.hello2=Bye\n"
        );
        assert_eq!(
            render(FlatFile.into(), &config, &chunk, "en"),
            "prefix.greeting.hello=Hello\nprefix.greeting.hello2=Bye\n"
        );
    }

    #[test]
    fn test_empty_chunk_renders() {
        let config = config();
        let chunk = Chunk::empty("empty");
        assert_eq!(
            render(RuntimeObject.into(), &config, &chunk, "en"),
            "var Resx = Resx || {};\nResx.current = Resx.current || {};\nResx.current.empty = {};\n"
        );
        assert_eq!(
            render(TypeDeclaration.into(), &config, &chunk, "en"),
            "interface IResx {\n    empty: {};\n}\n"
        );
        assert_eq!(render(FlatFile.into(), &config, &chunk, "en"), "");
    }

    #[test]
    fn test_missing_default_value_fails() {
        let config = config();
        let languages = LanguageSet::from_config(&config);
        let ctx = RenderContext {
            config: &config,
            languages: &languages,
            markup: Markup::new(4),
        };
        let chunk = Chunk {
            name: "broken".to_string(),
            entries: vec![KeyEntry {
                key: "only_ru".to_string(),
                values: [("ru".to_string(), "Только".to_string())].into_iter().collect(),
            }],
        };

        for artifact in Artifact::all() {
            let err = artifact.render(&chunk, "en", &ctx).unwrap_err();
            assert!(matches!(err, ResxError::InvalidSourceData { .. }));
        }
    }

    #[test]
    fn test_artifact_kinds() {
        let kinds: Vec<ArtifactKind> = Artifact::all().iter().map(|a| a.kind()).collect();
        assert_eq!(kinds, ArtifactKind::ALL.to_vec());
    }
}
