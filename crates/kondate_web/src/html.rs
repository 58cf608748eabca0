//! HTML rendering of a `PlannerView`.
//!
//! Every dynamic string passes through `escape_html`; clipboard buttons come
//! pre-rendered from core.

use kondate_core::{core_version, escape_html, PlannerView};
use std::fmt::Write;

const UNFILLED_LABEL: &str = "（未入力）";
const RECURRING_MARK: &str = " 🔁";
// Discards every memo of the current browser session.
const END_SESSION_FORM: &str = "<form method=\"post\" action=\"/session/end\">\
     <button type=\"submit\">🗑 セッションを終了</button></form>";

/// Renders the full planner page.
pub fn render_page(view: &PlannerView) -> String {
    let mut page = String::with_capacity(8 * 1024);
    let title = escape_html(view.title);

    let _ = write!(
        page,
        "<!DOCTYPE html>\n<html lang=\"ja\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>献立アプリ</title>\n</head>\n<body>\n<main>\n<h1>{title}</h1>\n"
    );
    render_week_picker(&mut page, view);
    render_day_tabs(&mut page, view);
    render_editor(&mut page, view);
    page.push_str("</main>\n<aside>\n");
    render_menu_summary(&mut page, view);
    render_shopping_summary(&mut page, view);
    let _ = write!(
        page,
        "</aside>\n<footer>\n{END_SESSION_FORM}\n<small>kondate {}</small>\n</footer>\n</body>\n</html>\n",
        escape_html(core_version())
    );
    page
}

fn render_week_picker(page: &mut String, view: &PlannerView) {
    let _ = write!(
        page,
        "<form method=\"post\" action=\"/week\">\n\
         <label>週の日付を選んでください \
         <input type=\"date\" name=\"date\" value=\"{}\" onchange=\"this.form.submit()\"></label>\n\
         <noscript><button type=\"submit\">表示</button></noscript>\n</form>\n",
        view.week_start
    );
}

fn render_day_tabs(page: &mut String, view: &PlannerView) {
    page.push_str("<nav aria-label=\"日付を選択\">\n");
    for tab in &view.days {
        let current = if tab.selected {
            " aria-current=\"date\" disabled"
        } else {
            ""
        };
        let _ = write!(
            page,
            "<form method=\"post\" action=\"/day\" style=\"display:inline\">\
             <input type=\"hidden\" name=\"date\" value=\"{}\">\
             <button type=\"submit\"{current}>{}</button></form>\n",
            tab.date,
            escape_html(&tab.label)
        );
    }
    page.push_str("</nav>\n");
}

fn render_editor(page: &mut String, view: &PlannerView) {
    let _ = write!(
        page,
        "<form method=\"post\" action=\"/save\">\n\
         <label>🍽 献立を入力（改行可）<br>\
         <textarea name=\"menu\" rows=\"6\">{}</textarea></label><br>\n\
         <label>🛍 買い物リストを入力（改行可）<br>\
         <textarea name=\"shopping\" rows=\"6\">{}</textarea></label><br>\n\
         <button type=\"submit\">💾 保存</button>\n</form>\n",
        escape_html(&view.menu_input),
        escape_html(&view.shopping_input)
    );
    if let Some(flash) = &view.flash {
        let _ = writeln!(page, "<p role=\"status\">{}</p>", escape_html(flash));
    }
}

fn render_menu_summary(page: &mut String, view: &PlannerView) {
    page.push_str("<h2>📅 今週の献立（閲覧）</h2>\n");
    for day in &view.sidebar.menu_days {
        let label = escape_html(&day.label);
        match &day.menu {
            Some(menu) => {
                let lines = menu
                    .lines()
                    .map(escape_html)
                    .collect::<Vec<_>>()
                    .join("<br>");
                let _ = writeln!(page, "<p><strong>{label}：</strong><br>{lines}</p>");
            }
            None => {
                let _ = writeln!(page, "<p><strong>{label}：</strong> {UNFILLED_LABEL}</p>");
            }
        }
    }
    page.push_str(&view.sidebar.menu_button.render_html());
    page.push('\n');
}

fn render_shopping_summary(page: &mut String, view: &PlannerView) {
    page.push_str("<h2>🛒 今週の買い物リスト</h2>\n");
    for line in &view.sidebar.shopping {
        let item = escape_html(&line.item);
        let mark = if line.recurring { RECURRING_MARK } else { "" };
        let checked = if line.checked { " checked" } else { "" };
        let _ = writeln!(
            page,
            "<form method=\"post\" action=\"/check\">\
             <input type=\"hidden\" name=\"item\" value=\"{item}\">\
             <label><input type=\"checkbox\"{checked} onchange=\"this.form.submit()\"> \
             {item}{mark}</label></form>"
        );
    }
    page.push_str(&view.sidebar.shopping_button.render_html());
    page.push('\n');
}
