//! JavaScript minification with oxc
//!
//! Parse, compress, mangle local names and print compact source. A script
//! that fails to parse is an error, not a pass-through.

use oxc::allocator::Allocator;
use oxc::codegen::{Codegen, CodegenOptions, CommentOptions};
use oxc::mangler::MangleOptions;
use oxc::minifier::{CompressOptions, Minifier, MinifierOptions};
use oxc::parser::Parser;
use oxc::span::SourceType;

/// How the browser will evaluate the script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptKind {
    /// Classic `<script>`: top-level bindings are globals shared with
    /// event handlers and other scripts, so they keep their names
    Classic,
    /// `<script type="module">`
    Module,
}

impl ScriptKind {
    fn source_type(self) -> SourceType {
        match self {
            ScriptKind::Classic => SourceType::script(),
            ScriptKind::Module => SourceType::mjs(),
        }
    }

    fn mangles_top_level(self) -> bool {
        self == ScriptKind::Module
    }
}

/// Minify `source`, returning the parser's first complaint on failure
pub fn minify_js(source: &str, kind: ScriptKind) -> Result<String, String> {
    let allocator = Allocator::default();
    let ret = Parser::new(&allocator, source, kind.source_type()).parse();
    if let Some(error) = ret.errors.first() {
        return Err(error.to_string());
    }
    if ret.panicked {
        return Err("parser aborted".to_string());
    }

    let mut program = ret.program;
    let options = MinifierOptions {
        mangle: Some(MangleOptions {
            top_level: Some(kind.mangles_top_level()),
            ..MangleOptions::default()
        }),
        compress: Some(CompressOptions::smallest()),
    };
    let ret = Minifier::new(options).minify(&allocator, &mut program);

    let code = Codegen::new()
        .with_options(CodegenOptions {
            minify: true,
            comments: CommentOptions::disabled(),
            ..CodegenOptions::default()
        })
        .with_scoping(ret.scoping)
        .build(&program)
        .code;
    Ok(code)
}

/// Minify on the blocking pool so a large bundle does not stall the fetches
/// still in flight on this task
pub async fn minify_js_blocking(source: String, kind: ScriptKind) -> Result<String, String> {
    tokio::task::spawn_blocking(move || minify_js(&source, kind))
        .await
        .map_err(|e| format!("minifier task failed: {e}"))?
}
