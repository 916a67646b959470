use crate::{BinaryOp, OrderBy, Query, QueryExpression, SelectItem};

fn eq(field: &str, value: f64) -> QueryExpression {
    QueryExpression::binary(
        BinaryOp::Eq,
        QueryExpression::attr(field),
        QueryExpression::number(value),
    )
}

#[test]
fn add_filter_accumulates_left() {
    let mut query = Query::new("page");
    query.add_filter(eq("a", 1.0));
    query.add_filter(eq("b", 2.0));
    query.add_filter(eq("c", 3.0));

    assert_eq!(
        query.filter,
        Some(eq("a", 1.0).and(eq("b", 2.0)).and(eq("c", 3.0)))
    );
}

#[test]
fn json_shape() {
    let mut query = Query::new("task");
    query.add_filter(eq("a", 1.0));
    query.order_by.push(OrderBy {
        expr: QueryExpression::attr("name"),
        desc: true,
    });
    query.limit = Some(QueryExpression::number(10.0));
    query.select = Some(vec![SelectItem {
        name: "name".into(),
        expr: None,
    }]);
    query.render = Some("template/task".into());
    query.render_all = true;

    insta::assert_snapshot!(query.to_json_pretty().unwrap(), @r#"
    {
      "querySource": "task",
      "filter": [
        "=",
        [
          "attr",
          "a"
        ],
        [
          "number",
          1
        ]
      ],
      "orderBy": [
        {
          "expr": [
            "attr",
            "name"
          ],
          "desc": true
        }
      ],
      "limit": [
        "number",
        10
      ],
      "select": [
        {
          "name": "name"
        }
      ],
      "render": "template/task",
      "renderAll": true
    }
    "#);
}

#[test]
fn json_omits_absent_parts() {
    let query = Query::new("page");
    assert_eq!(
        query.to_json().unwrap(),
        r#"{"querySource":"page","orderBy":[],"renderAll":false}"#
    );
}

#[test]
fn display_canonical_form() {
    let mut query = Query::new("page");
    query.add_filter(eq("a", 1.0));
    query.order_by.push(OrderBy {
        expr: QueryExpression::attr("name"),
        desc: false,
    });
    query.order_by.push(OrderBy {
        expr: QueryExpression::attr("age"),
        desc: true,
    });
    query.limit = Some(QueryExpression::number(5.0));
    query.select = Some(vec![
        SelectItem {
            name: "name".into(),
            expr: None,
        },
        SelectItem {
            name: "older".into(),
            expr: Some(QueryExpression::binary(
                BinaryOp::Add,
                QueryExpression::attr("age"),
                QueryExpression::number(1.0),
            )),
        },
    ]);
    query.render = Some("tpl".into());

    assert_eq!(
        query.to_string(),
        "page where a = 1 order by name, age desc limit 5 select name, age + 1 as older render [[tpl]]"
    );
}
