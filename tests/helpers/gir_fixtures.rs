//! GIR documents used across tests.

/// Wraps a namespace body in a complete `<repository>` document.
///
/// `includes` are `(name, version)` pairs emitted as `<include>` elements.
pub fn gir_document(namespace: &str, version: &str, includes: &[(&str, &str)], body: &str) -> String {
    let includes: String = includes
        .iter()
        .map(|(name, version)| format!("  <include name=\"{name}\" version=\"{version}\"/>\n"))
        .collect();
    format!(
        r#"<?xml version="1.0"?>
<repository version="1.2"
            xmlns="http://www.gtk.org/introspection/core/1.0"
            xmlns:c="http://www.gtk.org/introspection/c/1.0"
            xmlns:glib="http://www.gtk.org/introspection/glib/1.0">
{includes}  <namespace name="{namespace}" version="{version}">
{body}
  </namespace>
</repository>
"#
    )
}

/// A GLib stub with a couple of records and a function.
pub fn glib_stub() -> String {
    gir_document(
        "GLib",
        "2.0",
        &[],
        r#"    <record name="Error" c:type="GError" glib:type-name="GError"
            glib:get-type="g_error_get_type">
      <field name="code"><type name="gint" c:type="gint"/></field>
    </record>
    <function name="free" c:identifier="g_free">
      <return-value transfer-ownership="none"><type name="none" c:type="void"/></return-value>
      <parameters>
        <parameter name="mem" nullable="1"><type name="gpointer" c:type="gpointer"/></parameter>
      </parameters>
    </function>"#,
    )
}

/// A GObject stub depending on GLib.
pub fn gobject_stub() -> String {
    gir_document(
        "GObject",
        "2.0",
        &[("GLib", "2.0")],
        r#"    <class name="Object" c:type="GObject" glib:type-name="GObject"
           glib:get-type="g_object_get_type" glib:type-struct="ObjectClass">
      <field name="g_type_instance"><type name="TypeInstance" c:type="GTypeInstance"/></field>
    </class>
    <record name="ObjectClass" c:type="GObjectClass" glib:is-gtype-struct-for="Object">
      <field name="g_type_class"><type name="TypeClass" c:type="GTypeClass"/></field>
    </record>
    <record name="TypeInstance" c:type="GTypeInstance"/>
    <record name="TypeClass" c:type="GTypeClass"/>
    <interface name="TypePlugin" c:type="GTypePlugin" glib:type-name="GTypePlugin"
               glib:get-type="g_type_plugin_get_type"/>"#,
    )
}

/// A Gio stub depending on GObject and GLib.
pub fn gio_stub() -> String {
    gir_document(
        "Gio",
        "2.0",
        &[("GObject", "2.0"), ("GLib", "2.0")],
        r#"    <interface name="File" c:type="GFile" glib:type-name="GFile"
               glib:get-type="g_file_get_type">
      <prerequisite name="GObject.Object"/>
    </interface>"#,
    )
}

/// The primary document exercised by most integration tests.
pub const FOO_BODY: &str = r#"    <class name="Baz" c:type="FooBaz" parent="Bar" glib:type-name="FooBaz"
           glib:get-type="foo_baz_get_type"/>
    <class name="Bar" c:type="FooBar" parent="GObject.Object"
           glib:type-name="FooBar" glib:get-type="foo_bar_get_type"
           glib:type-struct="BarClass">
      <doc xml:space="preserve">A bar.</doc>
      <source-position filename="foo/bar.h" line="22"/>
      <implements name="Gio.File"/>
      <field name="parent_instance"><type name="GObject.Object" c:type="GObject"/></field>
      <constructor name="new" c:identifier="foo_bar_new">
        <return-value transfer-ownership="full"><type name="Bar" c:type="FooBar*"/></return-value>
      </constructor>
      <method name="set_label" c:identifier="foo_bar_set_label">
        <return-value transfer-ownership="none"><type name="none" c:type="void"/></return-value>
        <parameters>
          <instance-parameter name="self" transfer-ownership="none">
            <type name="Bar" c:type="FooBar*"/>
          </instance-parameter>
          <parameter name="label" transfer-ownership="full">
            <type name="utf8" c:type="const char*"/>
          </parameter>
        </parameters>
      </method>
      <property name="label" writable="1" transfer-ownership="none">
        <type name="utf8" c:type="gchar*"/>
      </property>
      <glib:signal name="changed" when="last">
        <return-value transfer-ownership="none"><type name="none" c:type="void"/></return-value>
      </glib:signal>
    </class>
    <record name="BarClass" c:type="FooBarClass" glib:is-gtype-struct-for="Bar" disguised="1"/>
    <function name="init" c:identifier="foo_init">
      <return-value transfer-ownership="none"><type name="gboolean" c:type="gboolean"/></return-value>
      <parameters>
        <parameter name="values" transfer-ownership="none">
          <array c:type="const char**"><type name="utf8" c:type="char*"/></array>
        </parameter>
        <parameter name="error" direction="out" transfer-ownership="full" nullable="1">
          <type name="GLib.Error" c:type="GError**"/>
        </parameter>
      </parameters>
    </function>"#;

/// The Foo document including GObject and Gio.
pub fn foo_document() -> String {
    gir_document(
        "Foo",
        "1.0",
        &[("GObject", "2.0"), ("Gio", "2.0")],
        FOO_BODY,
    )
}
