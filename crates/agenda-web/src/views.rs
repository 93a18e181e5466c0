//! Structured page results and the minimal HTML shell.
//!
//! Controllers hand back a [`Page`]; rendering here is deliberately thin.
//! The layout mirrors the original application shell (nav, container,
//! notification hook, client script) without a template engine.

use serde_json::Value;

pub struct Page {
  pub titulo:   String,
  pub mensagem: Option<String>,
  pub alert:    Option<&'static str>,
  pub body:     PageBody,
}

pub enum PageBody {
  Home,
  Form {
    action:   String,
    readonly: bool,
    fields:   Vec<Field>,
  },
  Listing {
    /// `(field key, column label)` pairs.
    colunas: Vec<(&'static str, &'static str)>,
    /// Flat field projections, one per row.
    linhas:  Vec<Value>,
    busca:   Option<String>,
  },
}

/// A single form input. `options` switches the input to a select.
pub struct Field {
  pub name:    &'static str,
  pub label:   &'static str,
  pub value:   String,
  pub options: Option<Vec<(String, String)>>,
}

// ─── Rendering ───────────────────────────────────────────────────────────────

pub fn render(page: &Page) -> String {
  let mut html = String::new();

  html.push_str(concat!(
    "<!DOCTYPE html>\n",
    "<html lang=\"pt-br\">\n<head>\n<meta charset=\"UTF-8\">\n",
  ));
  html.push_str(&format!("<title>{}</title>\n", escape(&page.titulo)));
  html.push_str(concat!(
    "<link rel=\"stylesheet\" href=\"/css/style.css\">\n",
    "</head>\n<body>\n",
    "<header><nav>",
    "<a href=\"/pessoa\">Pessoa</a> ",
    "<a href=\"/contato\">Contato</a>",
    "</nav></header>\n",
    "<main class=\"container-center\">\n",
  ));

  if let Some(mensagem) = &page.mensagem {
    let class = match page.alert {
      Some("error") => "alert alert-erro",
      _ => "alert alert-sucesso",
    };
    html.push_str(&format!(
      "<div class=\"{class}\">{}</div>\n",
      escape(mensagem)
    ));
  }

  html.push_str(&format!("<h1>{}</h1>\n", escape(&page.titulo)));

  match &page.body {
    PageBody::Home => render_home(&mut html),
    PageBody::Form { action, readonly, fields } => {
      render_form(&mut html, action, *readonly, fields)
    }
    PageBody::Listing { colunas, linhas, busca } => {
      render_listing(&mut html, colunas, linhas, busca.as_deref())
    }
  }

  html.push_str(concat!(
    "</main>\n",
    "<div id=\"notificacoes\"></div>\n",
    "<script src=\"/js/script.js\"></script>\n",
    "</body>\n</html>\n",
  ));
  html
}

fn render_home(html: &mut String) {
  html.push_str(concat!(
    "<section class=\"container-form\">\n",
    "<a href=\"/pessoa\" class=\"btn btn-primario\">Pessoas</a>\n",
    "<a href=\"/contato\" class=\"btn btn-secundario\">Contatos</a>\n",
    "</section>\n",
  ));
}

fn render_form(html: &mut String, action: &str, readonly: bool, fields: &[Field]) {
  html.push_str(&format!(
    "<form method=\"POST\" action=\"{}\" class=\"formulario modal-form\">\n",
    escape(action)
  ));

  for field in fields {
    html.push_str("<div class=\"form-grupo\">\n");
    html.push_str(&format!(
      "<label for=\"{0}\">{1}:</label>\n",
      field.name,
      escape(field.label)
    ));

    match &field.options {
      Some(options) => {
        let disabled = if readonly { " disabled" } else { "" };
        html.push_str(&format!(
          "<select id=\"{0}\" name=\"{0}\"{disabled}>\n",
          field.name
        ));
        html.push_str("<option value=\"\"></option>\n");
        for (value, label) in options {
          let selected =
            if *value == field.value { " selected" } else { "" };
          html.push_str(&format!(
            "<option value=\"{}\"{selected}>{}</option>\n",
            escape(value),
            escape(label)
          ));
        }
        html.push_str("</select>\n");
      }
      None => {
        let readonly_attr = if readonly { " readonly" } else { "" };
        html.push_str(&format!(
          "<input type=\"text\" id=\"{0}\" name=\"{0}\" value=\"{1}\"{readonly_attr}>\n",
          field.name,
          escape(&field.value)
        ));
      }
    }
    html.push_str("</div>\n");
  }

  html.push_str("<div class=\"form-botoes\">\n");
  if !readonly {
    html.push_str(
      "<button type=\"submit\" class=\"btn-primario\">Salvar</button>\n",
    );
  }
  html.push_str("<a href=\"/\" class=\"btn-secundario\">Voltar</a>\n</div>\n");
  html.push_str("</form>\n");
}

fn render_listing(
  html: &mut String,
  colunas: &[(&str, &str)],
  linhas: &[Value],
  busca: Option<&str>,
) {
  html.push_str(concat!(
    "<div class=\"acoes-barra\">\n",
    "<form method=\"get\" class=\"form-pesquisa\">\n",
  ));
  html.push_str(&format!(
    "<input type=\"text\" name=\"q\" value=\"{}\" placeholder=\"Pesquisar...\">\n",
    escape(busca.unwrap_or_default())
  ));
  html.push_str(concat!(
    "<button type=\"submit\" class=\"btn btn-secundario\">Buscar</button>\n",
    "</form>\n</div>\n",
  ));

  html.push_str("<table>\n<thead>\n<tr>");
  for (_, label) in colunas {
    html.push_str(&format!("<th>{}</th>", escape(label)));
  }
  html.push_str("</tr>\n</thead>\n<tbody>\n");

  if linhas.is_empty() {
    html.push_str(
      "<tr><td colspan=\"100%\">Nenhum registro encontrado.</td></tr>\n",
    );
  }
  for linha in linhas {
    html.push_str("<tr>");
    for (key, _) in colunas {
      html.push_str(&format!("<td>{}</td>", escape(&cell(linha, key))));
    }
    html.push_str("</tr>\n");
  }
  html.push_str("</tbody>\n</table>\n");
}

fn cell(linha: &Value, key: &str) -> String {
  match linha.get(key) {
    Some(Value::String(s)) => s.clone(),
    Some(Value::Number(n)) => n.to_string(),
    Some(Value::Bool(b)) => b.to_string(),
    _ => String::new(),
  }
}

fn escape(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  for c in s.chars() {
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

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn escape_neutralises_markup() {
    assert_eq!(
      escape(r#"<b>"x"&'y'</b>"#),
      "&lt;b&gt;&quot;x&quot;&amp;&#39;y&#39;&lt;/b&gt;"
    );
  }

  #[test]
  fn listing_renders_rows_and_empty_marker() {
    let page = Page {
      titulo:   "Lista de Pessoas".to_string(),
      mensagem: None,
      alert:    None,
      body:     PageBody::Listing {
        colunas: vec![("id", "ID"), ("nome", "Nome")],
        linhas:  vec![serde_json::json!({"id": 1, "nome": "Ana"})],
        busca:   Some("ana".to_string()),
      },
    };
    let html = render(&page);
    assert!(html.contains("<td>Ana</td>"));
    assert!(html.contains("value=\"ana\""));

    let empty = Page {
      body: PageBody::Listing {
        colunas: vec![("id", "ID")],
        linhas:  vec![],
        busca:   None,
      },
      ..page
    };
    assert!(render(&empty).contains("Nenhum registro encontrado."));
  }

  #[test]
  fn readonly_form_has_no_submit() {
    let page = Page {
      titulo:   "Visualizar Pessoa".to_string(),
      mensagem: None,
      alert:    None,
      body:     PageBody::Form {
        action:   "/pessoa/edit/1".to_string(),
        readonly: true,
        fields:   vec![Field {
          name:    "nome",
          label:   "Nome",
          value:   "Ana".to_string(),
          options: None,
        }],
      },
    };
    let html = render(&page);
    assert!(html.contains(" readonly"));
    assert!(!html.contains("type=\"submit\""));
  }
}
