use crate::models::{DailyTotal, MealEntry, Totals};
use std::fmt::Write;

pub fn render_overview() -> String {
    page("Overview", OVERVIEW_BODY)
}

pub fn render_calories(entries: &[MealEntry], totals: Totals) -> String {
    let rows = if entries.is_empty() {
        r#"<li class="empty">No meals logged yet.</li>"#.to_string()
    } else {
        entries
            .iter()
            .enumerate()
            .fold(String::new(), |mut out, (index, entry)| {
                let _ = write!(
                    out,
                    r#"<li class="row">
          <div>
            <span class="meal">{meal}</span>
            <span class="date">{date}</span>
          </div>
          <div class="row-right">
            <span>{calories} kcal</span>
            <span>{protein} g</span>
            <form method="post" action="/calories/{index}/remove">
              <button class="link" type="submit">Remove</button>
            </form>
          </div>
        </li>"#,
                    meal = escape_html(&entry.meal),
                    date = escape_html(&entry.date),
                    calories = entry.calories,
                    protein = entry.protein,
                );
                out
            })
    };

    let body = CALORIES_BODY
        .replace("{{CALORIES}}", &totals.calories.to_string())
        .replace("{{PROTEIN}}", &totals.protein.to_string())
        .replace("{{ROWS}}", &rows);
    page("Calorie Count", &body)
}

pub fn render_daily_totals(totals: &[DailyTotal]) -> String {
    let rows = if totals.is_empty() {
        r#"<li class="empty">No daily totals saved yet.</li>"#.to_string()
    } else {
        totals.iter().fold(String::new(), |mut out, total| {
            let _ = write!(
                out,
                r#"<li class="row stacked">
          <span class="meal">{date}</span>
          <span>Calories: {calories} kcal</span>
          <span>Protein: {protein} g</span>
        </li>"#,
                date = escape_html(&total.date),
                calories = total.total_calories,
                protein = total.total_protein,
            );
            out
        })
    };

    page("Daily Totals", &DAILY_TOTALS_BODY.replace("{{ROWS}}", &rows))
}

fn page(title: &str, body: &str) -> String {
    LAYOUT_HTML
        .replace("{{TITLE}}", title)
        .replace("{{BODY}}", body)
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const OVERVIEW_BODY: &str = r#"<header>
      <h1>Welcome</h1>
      <p class="subtitle">Log meals and keep a history of your daily totals.</p>
    </header>
    <nav class="actions">
      <a class="btn btn-go" href="/calories">Macro counter</a>
      <a class="btn btn-go" href="/daily-totals">Daily total</a>
    </nav>"#;

const CALORIES_BODY: &str = r#"<header>
      <h1>Calorie Counter</h1>
      <p class="subtitle"><a href="/">Overview</a> &middot; <a href="/daily-totals">Daily totals</a></p>
    </header>

    <form class="add-form" method="post" action="/calories/add">
      <input name="meal" placeholder="Meal" autocomplete="off" />
      <input name="calories" placeholder="Calories" inputmode="numeric" />
      <input name="protein" placeholder="Protein (g)" inputmode="numeric" />
      <button class="btn btn-go" type="submit">Add Meal</button>
    </form>

    <ul class="list">
        {{ROWS}}
    </ul>

    <section class="panel">
      <div class="stat">
        <span class="label">Total Calories</span>
        <span class="value">{{CALORIES}} kcal</span>
      </div>
      <div class="stat">
        <span class="label">Total Protein</span>
        <span class="value">{{PROTEIN}} g</span>
      </div>
    </section>

    <section class="actions">
      <form method="post" action="/calories/save-totals">
        <button class="btn btn-save" type="submit">Save Daily Totals</button>
      </form>
      <form method="post" action="/calories/clear">
        <button class="btn btn-clear" type="submit">Clear Meals</button>
      </form>
    </section>"#;

const DAILY_TOTALS_BODY: &str = r#"<header>
      <h1>Daily Totals</h1>
      <p class="subtitle"><a href="/">Overview</a> &middot; <a href="/calories">Calorie counter</a></p>
    </header>

    <ul class="list">
        {{ROWS}}
    </ul>"#;

const LAYOUT_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{TITLE}}</title>
  <style>
    :root {
      --bg-1: #eef6ea;
      --bg-2: #cfe8c4;
      --ink: #2b2a28;
      --accent: #008000;
      --accent-2: #ffa500;
      --danger: #c63b2b;
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 24px 60px rgba(0, 64, 0, 0.16);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #f6fbf3 60%, #eef6ea 100%);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(760px, 100%);
      background: var(--card);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 24px;
    }

    h1 {
      font-family: "Georgia", serif;
      font-size: clamp(2rem, 4vw, 2.6rem);
      margin: 0;
    }

    .subtitle {
      margin: 6px 0 0;
      color: #5f5c57;
    }

    .panel,
    .actions {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
      gap: 16px;
    }

    .stat {
      background: white;
      border-radius: 18px;
      padding: 18px;
      display: grid;
      gap: 8px;
    }

    .stat .label {
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #8b857d;
    }

    .stat .value {
      font-size: 1.6rem;
      font-weight: 600;
      color: var(--accent);
    }

    .add-form {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(140px, 1fr));
      gap: 12px;
    }

    input {
      padding: 12px 14px;
      border-radius: 12px;
      border: 1px solid rgba(0, 0, 0, 0.12);
      background: #f6f6f6;
      font-size: 1rem;
    }

    .list {
      list-style: none;
      margin: 0;
      padding: 0;
      display: grid;
      gap: 10px;
    }

    .row {
      display: flex;
      justify-content: space-between;
      align-items: center;
      background: white;
      border-radius: 12px;
      padding: 12px 16px;
    }

    .row.stacked {
      flex-direction: column;
      align-items: flex-start;
      gap: 4px;
    }

    .row-right {
      display: flex;
      align-items: center;
      gap: 12px;
    }

    .meal {
      display: block;
      font-weight: 600;
    }

    .date,
    .empty {
      color: #888888;
      font-size: 0.9rem;
    }

    .btn {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 14px 20px;
      font-size: 1rem;
      font-weight: 600;
      color: white;
      cursor: pointer;
      text-align: center;
      text-decoration: none;
      width: 100%;
    }

    .btn-go {
      background: var(--accent);
    }

    .btn-save {
      background: var(--accent-2);
    }

    .btn-clear {
      background: #6b645d;
    }

    button.link {
      background: none;
      border: none;
      color: var(--danger);
      text-decoration: underline;
      cursor: pointer;
    }
  </style>
</head>
<body>
  <main class="app">
    {{BODY}}
  </main>
</body>
</html>
"#;
