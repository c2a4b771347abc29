//! Whole-document assembly.

use crate::names::{Names, PickerNames};
use crate::options::DEFAULT_TITLE;
use crate::python::{self, Call, Expr};

/// The document produced for empty, absent or non-list input. Unlike a
/// composed document it has no trailing newline.
pub const MINIMAL_DOCUMENT: &str = "import flet as ft\n\ndef main(page):\n    page.title = \"Generated Flet App\"\n    page.add(ft.Container())\n\nft.app(main)";

/// Minimal document with a custom title.
pub fn minimal_document(title: Option<&str>) -> String {
    match title {
        None | Some(DEFAULT_TITLE) => MINIMAL_DOCUMENT.to_string(),
        Some(title) => MINIMAL_DOCUMENT.replace(
            &python::string(DEFAULT_TITLE),
            &python::string(title),
        ),
    }
}

/// Assemble the program: preamble, hoisted declarations, then the control
/// tree added to the page inside a full-size stack.
pub fn compose(title: Option<&str>, names: &Names, controls: Vec<Expr>) -> String {
    let mut sections: Vec<String> = Vec::new();

    if let Some(title) = title {
        sections.push(format!("    page.title = {}", python::string(title)));
    }

    let pickers: Vec<String> = names.pickers().map(picker_declarations).collect();
    if !pickers.is_empty() {
        sections.push(format!("    # File pickers\n{}", pickers.join("\n\n")));
    }

    let handlers: Vec<String> = names.handlers().map(handler_stub).collect();
    if !handlers.is_empty() {
        sections.push(format!("    # Button handlers\n{}", handlers.join("\n\n")));
    }

    let root = Call::new("page.add").arg(
        Call::new("ft.Stack")
            .arg(Expr::List(controls))
            .kwarg("expand", Expr::bool(true)),
    );
    sections.push(format!("    {}", root.render(1)));

    format!(
        "import flet as ft\n\n\ndef main(page: ft.Page):\n{}\n\n\nft.app(main)\n",
        sections.join("\n\n")
    )
}

fn picker_declarations(picker: &PickerNames) -> String {
    let PickerNames {
        dialog,
        result,
        status,
    } = picker;
    [
        format!("    def {}(e: ft.FilePickerResultEvent):", result),
        format!("        {}.value = (", status),
        "            \", \".join(map(lambda f: f.name, e.files)) if e.files else \"Cancelled!\"".to_string(),
        "        )".to_string(),
        format!("        {}.update()", status),
        String::new(),
        format!("    {} = ft.FilePicker(on_result={})", dialog, result),
        format!("    {} = ft.Text(\"No file chosen\", size=14)", status),
        format!("    page.overlay.append({})", dialog),
    ]
    .join("\n")
}

fn handler_stub(handler: &str) -> String {
    format!(
        "    def {}():\n        print({})",
        handler,
        python::string(&format!("{} called", handler))
    )
}
