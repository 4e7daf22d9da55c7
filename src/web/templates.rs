//! HTML templates, compiled into the binaries and registered with Tera at
//! startup. Chart markup is inserted with `| safe`; everything else is
//! auto-escaped (template names end in `.html`).

use tera::Tera;

pub const DASHBOARD: &str = "dashboard.html";
pub const PREDICTOR: &str = "predictor.html";
pub const ERROR: &str = "error.html";

const BASE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{% block title %}Employee Insight{% endblock title %}</title>
    <style>
        body {
            font-family: "Segoe UI", Arial, sans-serif;
            margin: 0;
            background: #f4f6f9;
            color: #263238;
        }
        header {
            background: #1e3a5f;
            color: white;
            padding: 18px 32px;
        }
        header h1 { margin: 0; font-size: 1.5em; }
        main {
            max-width: 1100px;
            margin: 24px auto;
            padding: 0 16px;
        }
        .card {
            background: white;
            border-radius: 8px;
            box-shadow: 0 2px 4px rgba(0,0,0,0.08);
            padding: 20px 24px;
            margin-bottom: 24px;
        }
        .fade-in {
            opacity: 0;
            transform: translateY(16px);
            transition: opacity 0.6s ease, transform 0.6s ease;
        }
        .chart svg { max-width: 100%; height: auto; }
        table { border-collapse: collapse; width: 100%; }
        th, td { text-align: left; padding: 8px 12px; border-bottom: 1px solid #eceff1; }
        .error {
            background: #ffebee;
            border-left: 4px solid #c62828;
            padding: 12px 16px;
            margin-bottom: 24px;
        }
        .note { color: #607d8b; font-size: 0.9em; }
        .score { font-size: 2.2em; font-weight: 600; color: #1e3a5f; }
    </style>
</head>
<body>
    <header><h1>{% block heading %}Employee Insight{% endblock heading %}</h1></header>
    <main>
{% block content %}{% endblock content %}
    </main>
    <script src="/static/control.js"></script>
</body>
</html>
"#;

const DASHBOARD_PAGE: &str = r#"{% extends "base.html" %}
{% block title %}Employee Performance Dashboard{% endblock title %}
{% block heading %}Employee Performance Dashboard{% endblock heading %}
{% block content %}
        <section class="card fade-in">
            <h2>Key Insights</h2>
            <ul>
            {% for insight in insights %}
                <li><strong>{{ insight.title }}:</strong> {{ insight.text }}</li>
            {% endfor %}
            </ul>
        </section>

        <section class="card fade-in">
            <h2>Average Performance by Department</h2>
            <table>
                <thead><tr><th>Department</th><th>Average Performance Score</th><th>Employees</th></tr></thead>
                <tbody>
                {% for row in department_performance %}
                    <tr class="performance-row"><td>{{ row.department }}</td><td>{{ row.mean_score }}</td><td>{{ row.employees }}</td></tr>
                {% endfor %}
                </tbody>
            </table>
        </section>

        {% for chart in charts %}
        <section class="card chart fade-in">
            {{ chart.svg | safe }}
        </section>
        {% endfor %}
{% endblock content %}
"#;

const PREDICTOR_PAGE: &str = r#"{% extends "base.html" %}
{% block title %}Employee Performance Predictor{% endblock title %}
{% block heading %}Employee Performance Predictor{% endblock heading %}
{% block content %}
        <section class="card fade-in">
            <form method="post" action="/predict">
                <label for="employee_id">Employee ID</label>
                <input type="text" id="employee_id" name="employee_id" value="{{ employee_id }}" required>
                <button type="submit">Predict</button>
            </form>
        </section>

        {% if error %}
        <div class="error">{{ error }}</div>
        {% endif %}

        {% if result %}
        <section class="card fade-in">
            <h2>Employee {{ result.profile.id }}</h2>
            <table>
                <tr class="performance-row"><th>Department</th><td>{{ result.profile.department }}</td></tr>
                <tr class="performance-row"><th>Job Title</th><td>{{ result.profile.job_title }}</td></tr>
                <tr class="performance-row"><th>Gender</th><td>{{ result.profile.gender }}</td></tr>
                <tr class="performance-row"><th>Age</th><td>{{ result.profile.age }}</td></tr>
                <tr class="performance-row"><th>Hire Date</th><td>{{ result.hire_date }}</td></tr>
                <tr class="performance-row"><th>Tenure</th><td>{{ result.tenure }}</td></tr>
                <tr class="performance-row"><th>Approx. Leave Count</th><td>{{ result.leave_count }}</td></tr>
                <tr class="performance-row"><th>Projects per Year</th><td>{{ result.projects_per_year }}</td></tr>
            </table>
        </section>

        <section class="card fade-in">
            <h2>Predicted Performance Score</h2>
            <p class="score">{{ result.score }}</p>
            <p class="note">Before leave: {{ result.before_leave }} &middot; After leave: {{ result.after_leave }} (simulated)</p>
        </section>

        <section class="card chart fade-in">
            {{ result.trend_chart.svg | safe }}
            <p class="note">Monthly scores are randomly simulated for illustration, not the employee's history.</p>
        </section>

        <section class="card chart fade-in">
            {{ result.comparison_chart.svg | safe }}
        </section>
        {% endif %}
{% endblock content %}
"#;

const ERROR_PAGE: &str = r#"{% extends "base.html" %}
{% block title %}Error{% endblock title %}
{% block content %}
        <div class="error">An error occurred: {{ message }}</div>
{% endblock content %}
"#;

fn build(pages: &[(&str, &str)]) -> tera::Result<Tera> {
    let mut tera = Tera::default();
    let mut all = vec![("base.html", BASE), (ERROR, ERROR_PAGE)];
    all.extend_from_slice(pages);
    tera.add_raw_templates(all)?;
    Ok(tera)
}

pub fn dashboard() -> tera::Result<Tera> {
    build(&[(DASHBOARD, DASHBOARD_PAGE)])
}

pub fn predictor() -> tera::Result<Tera> {
    build(&[(PREDICTOR, PREDICTOR_PAGE)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use tera::Context;

    #[test]
    fn templates_compile() {
        let d = dashboard().unwrap();
        assert!(d.get_template_names().any(|n| n == DASHBOARD));
        let p = predictor().unwrap();
        assert!(p.get_template_names().any(|n| n == PREDICTOR));
    }

    #[test]
    fn error_message_is_escaped() {
        let t = dashboard().unwrap();
        let mut ctx = Context::new();
        ctx.insert("message", "<b>bad</b>");
        let html = t.render(ERROR, &ctx).unwrap();
        assert!(html.contains("An error occurred: &lt;b&gt;bad"));
        assert!(!html.contains("<b>bad"));
    }

    #[test]
    fn empty_predictor_page_renders_form_only() {
        let t = predictor().unwrap();
        let mut ctx = Context::new();
        ctx.insert("employee_id", "");
        ctx.insert("error", &Option::<String>::None);
        ctx.insert("result", &Option::<String>::None);
        let html = t.render(PREDICTOR, &ctx).unwrap();
        assert!(html.contains(r#"action="/predict""#));
        assert!(!html.contains("Predicted Performance Score"));
    }
}
