use crate::period::Period;

pub fn render_index() -> String {
    INDEX_HTML.replace("{{PERIOD_OPTIONS}}", &period_options())
}

fn period_options() -> String {
    Period::ALL
        .iter()
        .map(|period| {
            let selected = if *period == Period::default() { " selected" } else { "" };
            format!(
                r#"<option value="{value}"{selected}>{label}</option>"#,
                value = period.as_str(),
                label = period_label(*period),
            )
        })
        .collect::<Vec<_>>()
        .join("\n          ")
}

fn period_label(period: Period) -> &'static str {
    match period {
        Period::Today => "Today",
        Period::Yesterday => "Yesterday",
        Period::ThisWeek => "This week",
        Period::LastWeek => "Last week",
        Period::ThisMonth => "This month",
        Period::LastMonth => "Last month",
        Period::ThisYear => "This year",
        Period::LastYear => "Last year",
        Period::AllTime => "All time",
    }
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Shopify Order Counter</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #eef4ec;
      --bg-2: #b9dcb0;
      --ink: #22302a;
      --accent: #5e8e3e;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.88);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #e3f0dd 60%, #f4f8f2 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(560px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 24px;
      text-align: center;
      animation: rise 600ms ease;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(1.8rem, 4vw, 2.4rem);
      margin: 0;
    }

    select {
      justify-self: center;
      appearance: none;
      border: 1px solid rgba(47, 72, 88, 0.16);
      border-radius: 999px;
      padding: 10px 20px;
      font: inherit;
      font-weight: 600;
      color: var(--accent-2);
      background: white;
      cursor: pointer;
    }

    .count {
      font-size: clamp(3.5rem, 12vw, 6rem);
      font-weight: 600;
      color: var(--accent);
      line-height: 1;
      font-variant-numeric: tabular-nums;
    }

    .label {
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #7d877f;
    }

    .status {
      font-size: 0.9rem;
      color: #6b645d;
      min-height: 1.2em;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }

    @keyframes rise {
      from {
        opacity: 0;
        transform: translateY(18px);
      }
      to {
        opacity: 1;
        transform: translateY(0);
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <h1>Orders</h1>
    <select id="period" aria-label="Period">
          {{PERIOD_OPTIONS}}
    </select>
    <div>
      <div class="count" id="count">--</div>
      <div class="label" id="period-label">All time</div>
    </div>
    <div class="status" id="status"></div>
  </main>

  <script>
    const REFRESH_MS = 30000;
    const countEl = document.getElementById('count');
    const periodEl = document.getElementById('period');
    const periodLabelEl = document.getElementById('period-label');
    const statusEl = document.getElementById('status');

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const load = async () => {
      const period = periodEl.value;
      const res = await fetch(`/api/orders/count?period=${encodeURIComponent(period)}`);
      const data = await res.json();
      if (!res.ok || !data.success) {
        throw new Error(data.error || 'Unable to load order count');
      }
      countEl.textContent = data.count.toLocaleString();
      periodLabelEl.textContent = periodEl.options[periodEl.selectedIndex].text;
      setStatus(`Updated ${new Date(data.timestamp).toLocaleTimeString()}`, 'ok');
    };

    const refresh = () => load().catch((err) => setStatus(err.message, 'error'));

    periodEl.addEventListener('change', refresh);
    setInterval(refresh, REFRESH_MS);
    refresh();
  </script>
</body>
</html>
"#;
